//! Marketplace Domain Concerns

pub mod categories;
pub mod dashboard;
pub mod pagination;
pub mod products;
pub mod promotions;
pub(crate) mod rows;
pub mod users;
pub mod validation;
pub mod vendors;
