//! Track Click Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiMessage},
    extensions::*,
    observability::{self, Event},
    products::errors::into_status_error,
    state::State,
};

/// Track Click Handler
///
/// Records that a shopper used the vendor's contact details.
#[endpoint(
    tags("products"),
    summary = "Track Click",
    responses(
        (status_code = StatusCode::OK, description = "Click tracked"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .products
        .track_click(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    observability::record(Event::ProductClick);

    Ok(envelope::message("Click tracked"))
}
