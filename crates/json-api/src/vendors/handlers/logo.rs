//! Vendor Logo Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    observability::{self, Event},
    state::State,
    uploads,
    vendors::{VendorResponse, into_status_error},
};

/// Replace Vendor Logo Handler
///
/// Takes `multipart/form-data` with one `logo` image. The previous logo is deleted.
#[endpoint(
    tags("vendors"),
    summary = "Replace Vendor Logo",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Logo replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "No logo, or a rejected file"),
        (status_code = StatusCode::NOT_FOUND, description = "No vendor profile yet"),
    ),
)]
#[tracing::instrument(
    name = "vendors.logo",
    skip(req, depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<VendorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;
    let upload = uploads::file(req, "logo", "Please upload a logo").await?;

    tracing::Span::current().record("user_uuid", tracing::field::display(caller.uuid));

    let vendor = state
        .app
        .vendors
        .replace_logo(caller.uuid, upload)
        .await
        .map_err(into_status_error)?;

    observability::record(Event::ImageUploaded);
    tracing::info!(vendor_uuid = %vendor.uuid, "replaced vendor logo");

    Ok(envelope::data_with_message(
        "Logo uploaded successfully",
        VendorResponse::from(vendor),
    ))
}
