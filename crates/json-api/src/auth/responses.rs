//! Auth Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use marketplace_app::auth::Session;

use crate::{users::UserResponse, vendors::VendorResponse};

/// A signed-in user and the bearer token to send on later requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user.into(),
            token: session.token,
            expires_at: session.expires_at.to_string(),
        }
    }
}

/// The caller's account, with the vendor profile for vendors that have one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    pub user: UserResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorResponse>,
}
