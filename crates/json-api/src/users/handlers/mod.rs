//! User Handlers

pub(crate) mod saved;
