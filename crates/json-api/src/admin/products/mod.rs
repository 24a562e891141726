//! Product Moderation

pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod toggle;
