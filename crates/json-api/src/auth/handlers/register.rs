//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::{auth::Registration, domain::users::records::Role};

use crate::{
    auth::{errors::into_status_error, responses::SessionResponse},
    envelope::{self, ApiResponse},
    errors::unparsable,
    extensions::*,
    observability::{self, Event},
    state::State,
    vendors::VendorProfileRequest,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `customer` (default) or `vendor`
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Creates a pending vendor profile when registering as a vendor
    #[serde(default)]
    pub vendor_info: Option<VendorProfileRequest>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = StatusError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        let role = request
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()
            .map_err(unparsable)?;

        Ok(Registration {
            name: request.name,
            email: request.email,
            password: request.password,
            role,
            phone: request.phone,
            vendor: request.vendor_info.map(Into::into),
        })
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.register",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, role = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<SessionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let registration = Registration::try_from(json.into_inner())?;

    let session = state
        .app
        .auth
        .register(registration)
        .await
        .map_err(into_status_error)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(session.user.uuid));
    span.record("role", session.user.role.as_str());

    res.status_code(StatusCode::CREATED);
    observability::record(Event::Registration);

    tracing::info!(user_uuid = %session.user.uuid, "registered user");

    Ok(envelope::data_with_message(
        "User registered successfully",
        SessionResponse::from(session),
    ))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::auth::{AuthServiceError, MockAuthService, Session};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user, public_service};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            Router::with_path("auth/register").post(handler),
        )
    }

    fn session(role: Role) -> Session {
        Session {
            user: make_user(TEST_USER_UUID, role),
            token: "signed.jwt.token".to_string(),
            expires_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_register_customer_returns_201_with_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| {
                registration.email == "ada@example.com"
                    && registration.role.is_none()
                    && registration.vendor.is_none()
            })
            .return_once(|_| Ok(session(Role::Customer)));

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Ada Obi",
                "email": "ada@example.com",
                "password": "secret1"
            }))
            .send(&make_service(auth))
            .await;

        let body: ApiResponse<SessionResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(body.success);
        assert_eq!(body.message.as_deref(), Some("User registered successfully"));
        assert_eq!(
            body.data.map(|session| session.token),
            Some("signed.jwt.token".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_register_vendor_forwards_vendor_info() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|registration| {
                registration.role == Some(Role::Vendor)
                    && registration
                        .vendor
                        .as_ref()
                        .is_some_and(|vendor| vendor.location.city == "Lagos")
            })
            .return_once(|_| Ok(session(Role::Vendor)));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Ada Obi",
                "email": "ada@example.com",
                "password": "secret1",
                "role": "vendor",
                "vendor_info": {
                    "business_name": "Ada's Lamps",
                    "location": { "address": "1 Market Street", "city": "Lagos", "country": "Nigeria" },
                    "contact_info": { "phone": "+2348000000000" }
                }
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_unknown_role_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register().never();

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Ada Obi",
                "email": "ada@example.com",
                "password": "secret1",
                "role": "superuser"
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "name": "Ada Obi",
                "email": "ada@example.com",
                "password": "secret1"
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
