//! Toggle User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

/// Deactivate an active account, or reactivate an inactive one. Admin accounts are refused.
#[endpoint(
    tags("admin"),
    summary = "Toggle User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User toggled"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin accounts cannot be deactivated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.users.toggle",
    skip(user, depot),
    fields(user_uuid = tracing::field::Empty, is_active = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = user.into_inner().into();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let updated = state
        .app
        .users
        .toggle_active(user)
        .await
        .map_err(into_status_error)?;

    span.record("is_active", updated.is_active);

    let message = if updated.is_active {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };

    Ok(envelope::data_with_message(message, UserResponse::from(updated)))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::users::{
        MockUsersService, UsersServiceError,
        records::{Role, UserUuid},
    };

    use crate::test_helpers::{Mocks, make_user, user_service};

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        user_service(
            Mocks {
                users,
                ..Mocks::default()
            },
            Role::Admin,
            Router::with_path("admin/users/{user}/toggle-active").put(handler),
        )
    }

    #[tokio::test]
    async fn test_deactivate_customer() -> TestResult {
        let uuid = UserUuid::new();
        let mut users = MockUsersService::new();

        users
            .expect_toggle_active()
            .once()
            .with(eq(uuid))
            .return_once(|user| {
                let mut record = make_user(user, Role::Customer);
                record.is_active = false;

                Ok(record)
            });

        let mut res = TestClient::put(format!(
            "http://example.com/admin/users/{uuid}/toggle-active"
        ))
        .send(&make_service(users))
        .await;

        let body: ApiResponse<UserResponse> = res.take_json().await?;

        assert_eq!(body.message.as_deref(), Some("User deactivated successfully"));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_admin_returns_403() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_toggle_active()
            .once()
            .return_once(|_| Err(UsersServiceError::AdminProtected));

        let mut res = TestClient::put(format!(
            "http://example.com/admin/users/{}/toggle-active",
            UserUuid::new()
        ))
        .send(&make_service(users))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(res.take_string().await?.contains("Cannot deactivate admin users"));

        Ok(())
    }
}
