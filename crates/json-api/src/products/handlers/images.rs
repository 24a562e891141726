//! Product Images Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    observability::{self, Event},
    products::{ProductResponse, errors::into_status_error},
    state::State,
    uploads,
};

/// Replace Product Images Handler
///
/// Takes `multipart/form-data` with up to five `images` parts, each a JPEG, PNG, GIF or WebP
/// of at most 5 MiB. The previous images are deleted.
#[endpoint(
    tags("products"),
    summary = "Replace Product Images",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Images replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "No images, or a rejected file"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the product's vendor"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "products.images",
    skip(product, req, depot),
    fields(product_uuid = tracing::field::Empty, images = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;
    let product = product.into_inner().into();
    let images = uploads::files(req, "images").await;

    if images.is_empty() {
        return Err(StatusError::bad_request().brief("Please upload at least one image"));
    }

    let count = images.len();
    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("images", count);

    let updated = state
        .app
        .products
        .replace_images(vendor, product, images)
        .await
        .map_err(into_status_error)?;

    observability::record_many(Event::ImageUploaded, count);

    tracing::info!(product_uuid = %updated.uuid, "replaced product images");

    Ok(envelope::data_with_message(
        "Images uploaded successfully",
        ProductResponse::from(updated),
    ))
}
