//! Promotion Handlers

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod mine;
