//! Save Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    observability::{self, Event},
    products::{errors::into_status_error, responses::SaveResponse},
    state::State,
};

/// Save Product Handler
///
/// Bookmarks the product, or removes the bookmark when it already exists.
#[endpoint(
    tags("products"),
    summary = "Toggle Saved Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bookmark toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "products.save",
    skip(product, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<SaveResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;
    let product = product.into_inner().into();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(caller.uuid));
    span.record("product_uuid", tracing::field::display(product));

    let toggle = state
        .app
        .products
        .toggle_saved(caller.uuid, product)
        .await
        .map_err(into_status_error)?;

    let message = if toggle.is_saved {
        observability::record(Event::ProductSaved);

        "Product saved"
    } else {
        "Product unsaved"
    };

    Ok(envelope::data_with_message(message, SaveResponse::from(toggle)))
}
