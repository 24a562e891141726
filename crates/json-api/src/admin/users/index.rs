//! Admin User List Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use marketplace_app::domain::{
    pagination::DEFAULT_PAGE_LIMIT,
    users::{data::UsersFilter, records::Role},
};

use crate::{
    envelope::{self, ApiResponse},
    errors::unparsable,
    extensions::*,
    state::State,
    users::{UserResponse, errors::into_status_error},
};

#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct AdminUsersQuery {
    /// `customer`, `vendor` or `admin`
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Users, newest first. Password hashes are never included.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    query: AdminUsersQuery,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let role = query
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(unparsable)?;

    let page = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .into_request(DEFAULT_PAGE_LIMIT)?;

    let page = state
        .app
        .users
        .list_users(UsersFilter {
            role,
            is_active: query.is_active,
            page,
        })
        .await
        .map_err(into_status_error)?;

    Ok(envelope::page(page))
}
