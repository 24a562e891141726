//! Toggle Product Visibility Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    products::{self, ProductResponse},
    state::State,
};

/// Hide an active product, or show a hidden one.
#[endpoint(
    tags("admin"),
    summary = "Toggle Product Visibility",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Visibility toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.products.toggle",
    skip(product, depot),
    fields(product_uuid = tracing::field::Empty, is_active = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner().into();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));

    let updated = state
        .app
        .products
        .toggle_active(product)
        .await
        .map_err(products::into_status_error)?;

    span.record("is_active", updated.is_active);

    let message = if updated.is_active {
        "Product activated successfully"
    } else {
        "Product deactivated successfully"
    };

    Ok(envelope::data_with_message(
        message,
        ProductResponse::from(updated),
    ))
}
