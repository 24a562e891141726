//! Get Vendor Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    vendors::{into_status_error, responses::PublicVendorResponse},
};

/// Get Vendor Handler
///
/// An approved vendor's public page with its newest active products. Counts a profile view.
#[endpoint(
    tags("vendors"),
    summary = "Get Vendor",
    responses(
        (status_code = StatusCode::OK, description = "Vendor found"),
        (status_code = StatusCode::NOT_FOUND, description = "Vendor not found"),
    ),
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PublicVendorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .vendors
        .get_public_vendor(vendor.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data_with_message(
        "Vendor details retrieved",
        PublicVendorResponse::from(page),
    ))
}
