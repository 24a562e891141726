//! Authentication and role gating.

mod errors;
mod models;
mod password;
mod repository;
mod roles;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::*;
pub use roles::*;
pub use service::*;
pub use token::*;
