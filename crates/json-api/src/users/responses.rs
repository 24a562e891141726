//! User Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::users::records::UserRecord;

/// A user account. Password hashes never leave the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    /// `customer`, `vendor` or `admin`
    pub role: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            phone: user.phone,
            is_active: user.is_active,
            is_email_verified: user.is_email_verified,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}
