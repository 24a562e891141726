//! Auth models.

use jiff::Timestamp;

use crate::domain::{
    users::records::{Role, UserRecord, UserUuid},
    vendors::data::VendorProfile,
};

/// The user behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// A logged-in user and their access token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
    pub expires_at: Timestamp,
}

/// Self-service sign up.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`Role::Customer`].
    pub role: Option<Role>,
    pub phone: Option<String>,
    /// Vendor details to create a pending vendor profile with.
    pub vendor: Option<VendorProfile>,
}

/// Stored credentials for an account.
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub uuid: UserUuid,
    pub password_hash: String,
    pub is_active: bool,
}
