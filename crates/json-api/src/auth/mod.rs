//! Authentication

pub(crate) mod errors;
pub(crate) mod gates;
mod handlers;
pub(crate) mod middleware;
mod responses;

pub(crate) use handlers::*;
