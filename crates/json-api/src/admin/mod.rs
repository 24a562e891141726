//! Admin
//!
//! Every route here sits behind the admin role gate.

pub(crate) mod products;
pub(crate) mod promotions;
mod responses;
pub(crate) mod stats;
pub(crate) mod users;
pub(crate) mod vendors;
