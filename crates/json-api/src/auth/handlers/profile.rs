//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::users::data::ProfileUpdate;

use crate::{
    auth::responses::AccountResponse,
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    users::errors::into_status_error,
};

/// Update Profile Request. Omitted fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            phone: request.phone,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("auth"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(
    name = "auth.profile",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(caller.uuid));

    let user = state
        .app
        .users
        .update_profile(caller.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data_with_message(
        "Profile updated successfully",
        AccountResponse {
            user: user.into(),
            vendor: None,
        },
    ))
}
