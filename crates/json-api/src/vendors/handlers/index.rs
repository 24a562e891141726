//! Vendor Directory Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use marketplace_app::domain::{
    pagination::DEFAULT_PAGE_LIMIT,
    vendors::{data::VendorsFilter, records::VendorStatus},
};

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    vendors::{VendorResponse, into_status_error},
};

#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct VendorsQuery {
    /// Vendor city, matched case-insensitively
    pub city: Option<String>,
    /// Text searched in business name and description
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Vendor Directory Handler
///
/// Lists approved vendors only, newest first.
#[endpoint(
    tags("vendors"),
    summary = "List Vendors",
    responses(
        (status_code = StatusCode::OK, description = "Vendor page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    query: VendorsQuery,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<VendorResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .into_request(DEFAULT_PAGE_LIMIT)?;

    let vendors = state
        .app
        .vendors
        .list_vendors(VendorsFilter {
            status: Some(VendorStatus::Approved),
            city: query.city.filter(|city| !city.trim().is_empty()),
            search: query.search.filter(|search| !search.trim().is_empty()),
            page,
        })
        .await
        .map_err(into_status_error)?;

    Ok(envelope::page(vendors))
}
