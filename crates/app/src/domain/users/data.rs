//! Users Data

use crate::domain::{
    pagination::PageRequest,
    users::records::{Role, UserUuid},
};

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub phone: Option<String>,
}

/// Profile fields a user may change about themselves. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Admin user listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersFilter {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub page: PageRequest,
}
