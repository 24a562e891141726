//! Promotion Management

pub(crate) mod index;
pub(crate) mod payment;
