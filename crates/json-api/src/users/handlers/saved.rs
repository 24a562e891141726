//! Saved Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::domain::pagination::DEFAULT_PAGE_LIMIT;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    products::{self, ProductResponse},
    state::State,
};

/// The caller's bookmarked products, most recently saved first.
#[endpoint(
    tags("users"),
    summary = "Saved Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product page"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    page: PageParams,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;

    let page = state
        .app
        .products
        .list_saved(caller.uuid, page.into_request(DEFAULT_PAGE_LIMIT)?)
        .await
        .map_err(products::into_status_error)?;

    Ok(envelope::page(page))
}
