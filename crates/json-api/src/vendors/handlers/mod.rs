//! Vendor Handlers

pub(crate) mod analytics;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod logo;
pub(crate) mod me;
pub(crate) mod upsert;
