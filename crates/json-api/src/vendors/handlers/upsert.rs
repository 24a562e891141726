//! Upsert Vendor Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    vendors::{VendorProfileRequest, VendorResponse, into_status_error},
};

/// Upsert Vendor Profile Handler
///
/// Creates the caller's profile as `pending`, or replaces the business details of an
/// existing one without touching its status.
#[endpoint(
    tags("vendors"),
    summary = "Save Vendor Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vendor profile saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing required fields"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a vendor"),
    ),
)]
#[tracing::instrument(
    name = "vendors.upsert",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty, vendor_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<VendorProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<VendorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(caller.uuid));

    let vendor = state
        .app
        .vendors
        .upsert_profile(caller.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("vendor_uuid", tracing::field::display(vendor.uuid));

    tracing::info!(vendor_uuid = %vendor.uuid, "saved vendor profile");

    Ok(envelope::data_with_message(
        "Vendor profile updated successfully",
        VendorResponse::from(vendor),
    ))
}
