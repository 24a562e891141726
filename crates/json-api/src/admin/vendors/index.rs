//! Admin Vendor List Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use marketplace_app::domain::{
    pagination::DEFAULT_PAGE_LIMIT,
    vendors::{data::VendorsFilter, records::VendorStatus},
};

use crate::{
    admin::responses::AdminVendorResponse,
    envelope::{self, ApiResponse},
    errors::unparsable,
    extensions::*,
    state::State,
    vendors,
};

#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct AdminVendorsQuery {
    /// `pending`, `approved` or `blocked`. Every status when omitted.
    pub status: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Every vendor regardless of approval, newest first, with its owner account.
#[endpoint(
    tags("admin"),
    summary = "List All Vendors",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vendor page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    query: AdminVendorsQuery,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<AdminVendorResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = query
        .status
        .as_deref()
        .map(str::parse::<VendorStatus>)
        .transpose()
        .map_err(unparsable)?;

    let page = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .into_request(DEFAULT_PAGE_LIMIT)?;

    let page = state
        .app
        .vendors
        .list_vendors_with_owners(VendorsFilter {
            status,
            city: query.city,
            search: query.search,
            page,
        })
        .await
        .map_err(vendors::into_status_error)?;

    Ok(envelope::page(page))
}
