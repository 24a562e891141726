//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use marketplace_app::auth::AuthenticatedUser;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Require a valid bearer token and attach its user.
#[handler]
pub(crate) async fn protect(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req).map(str::to_owned) else {
        res.render(
            StatusError::unauthorized().brief("Not authorized to access this route. Please login."),
        );
        ctrl.skip_rest();

        return;
    };

    match authenticate(depot, &token).await {
        Ok(user) => depot.insert_user(user),
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// Attach the user when a valid bearer token is sent, otherwise carry on anonymously.
#[handler]
pub(crate) async fn optional_auth(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(token) = extract_bearer_token(req).map(str::to_owned) {
        match authenticate(depot, &token).await {
            Ok(user) => depot.insert_user(user),
            Err(status) => debug!(reason = %status.brief, "continuing without a user"),
        }
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(depot: &Depot, token: &str) -> Result<AuthenticatedUser, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(into_status_error)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use marketplace_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::users::records::Role,
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, test_user};

    use super::*;

    #[handler]
    async fn whoami(depot: &mut Depot) -> String {
        depot
            .current_user()
            .map_or_else(|| "anonymous".to_string(), |user| user.email.clone())
    }

    fn make_service(auth: MockAuthService, gate: impl Handler) -> Service {
        let state = Mocks {
            auth,
            ..Mocks::default()
        }
        .into_state();

        Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(gate)
                .push(Router::new().get(whoami)),
        )
    }

    fn accepting(token: &'static str) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(move |bearer| bearer == token)
            .return_once(|_| Ok(test_user(Role::Customer)));

        auth
    }

    fn rejecting(error: AuthServiceError) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(move |_| Err(error));

        auth
    }

    #[tokio::test]
    async fn test_protect_without_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth, protect))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_protect_non_bearer_scheme_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth, protect))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_protect_unknown_user_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(rejecting(AuthServiceError::UserNotFound), protect))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_protect_deactivated_user_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(
                rejecting(AuthServiceError::AccountDeactivated),
                protect,
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_protect_valid_token_attaches_user() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(accepting("abc123"), protect))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_auth_without_header_is_anonymous() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(auth, optional_auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_auth_ignores_invalid_tokens() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer expired", true)
            .send(&make_service(
                rejecting(AuthServiceError::UserNotFound),
                optional_auth,
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_auth_attaches_valid_user() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(accepting("abc123"), optional_auth))
            .await;

        assert_eq!(res.take_string().await?, "ada@example.com");

        Ok(())
    }
}
