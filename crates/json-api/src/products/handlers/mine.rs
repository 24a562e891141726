//! Vendor's Own Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::domain::pagination::DEFAULT_PAGE_LIMIT;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// List the calling vendor's products, hidden ones included.
#[endpoint(
    tags("products"),
    summary = "My Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product page"),
        (status_code = StatusCode::FORBIDDEN, description = "Vendor not approved"),
    ),
)]
pub(crate) async fn handler(
    page: PageParams,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;

    let page = state
        .app
        .products
        .list_vendor_products(vendor, page.into_request(DEFAULT_PAGE_LIMIT)?)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::page(page))
}
