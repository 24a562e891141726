//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::domain::{users::records::Role, vendors::VendorsServiceError};

use crate::{
    auth::responses::AccountResponse,
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    users::errors::into_status_error,
    vendors,
};

/// Current User Handler
///
/// Vendors also get their vendor profile, when they have created one.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<AccountResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;

    let user = state
        .app
        .users
        .get_user(caller.uuid)
        .await
        .map_err(into_status_error)?;

    let vendor = if user.role == Role::Vendor {
        match state.app.vendors.get_vendor_for_user(user.uuid).await {
            Ok(vendor) => Some(vendor.into()),
            Err(VendorsServiceError::NotFound) => None,
            Err(error) => return Err(vendors::into_status_error(error)),
        }
    } else {
        None
    };

    Ok(envelope::data_with_message(
        "User profile retrieved",
        AccountResponse {
            user: user.into(),
            vendor,
        },
    ))
}
