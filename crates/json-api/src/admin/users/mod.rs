//! User Management

pub(crate) mod index;
pub(crate) mod toggle;
