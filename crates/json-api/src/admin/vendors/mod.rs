//! Vendor Moderation

pub(crate) mod index;
pub(crate) mod status;
