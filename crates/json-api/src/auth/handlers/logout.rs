//! Logout Handler

use salvo::prelude::*;

use crate::envelope::{self, ApiMessage};

/// Logout Handler
///
/// Tokens are stateless, so clients log out by discarding theirs.
#[endpoint(
    tags("auth"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "Logged out")),
)]
pub(crate) async fn handler() -> Json<ApiMessage> {
    envelope::message("Logged out successfully")
}
