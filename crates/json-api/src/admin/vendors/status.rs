//! Vendor Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::vendors::records::VendorStatus;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    vendors::{self, VendorResponse},
};

/// Vendor Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorStatusRequest {
    /// `approved`, `blocked` or `pending`
    pub status: String,
}

/// Approve, block or reset a vendor.
#[endpoint(
    tags("admin"),
    summary = "Set Vendor Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
        (status_code = StatusCode::NOT_FOUND, description = "Vendor not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.vendors.status",
    skip(vendor, json, depot),
    fields(vendor_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    vendor: PathParam<Uuid>,
    json: JsonBody<VendorStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<VendorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = vendor.into_inner().into();

    let Ok(status) = json.into_inner().status.parse::<VendorStatus>() else {
        return Err(StatusError::bad_request().brief("Invalid status"));
    };

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));
    span.record("status", status.as_str());

    let updated = state
        .app
        .vendors
        .set_status(vendor, status)
        .await
        .map_err(vendors::into_status_error)?;

    tracing::info!(vendor_uuid = %updated.uuid, status = status.as_str(), "changed vendor status");

    Ok(envelope::data_with_message(
        format!("Vendor {status} successfully"),
        VendorResponse::from(updated),
    ))
}
