//! Change Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::errors::into_status_error,
    envelope::{self, ApiMessage},
    extensions::*,
    state::State,
};

/// Change Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change Password Handler
#[endpoint(
    tags("auth"),
    summary = "Change Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "New password too short"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Current password is incorrect"),
    ),
)]
#[tracing::instrument(
    name = "auth.password",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ChangePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("user_uuid", tracing::field::display(caller.uuid));

    state
        .app
        .auth
        .change_password(caller.uuid, &request.current_password, &request.new_password)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::message("Password changed successfully"))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::records::Role,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, user_service};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        user_service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            Role::Customer,
            Router::with_path("auth/password").put(handler),
        )
    }

    #[tokio::test]
    async fn test_change_password_success() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_change_password()
            .once()
            .withf(|uuid, current, new| {
                *uuid == TEST_USER_UUID && current == "secret1" && new == "secret2"
            })
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::put("http://example.com/auth/password")
            .json(&json!({ "current_password": "secret1", "new_password": "secret2" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_change_password_wrong_current_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_change_password()
            .once()
            .return_once(|_, _, _| Err(AuthServiceError::IncorrectPassword));

        let res = TestClient::put("http://example.com/auth/password")
            .json(&json!({ "current_password": "nope", "new_password": "secret2" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
