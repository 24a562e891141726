//! Admin Promotion List Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use marketplace_app::domain::{
    pagination::DEFAULT_PAGE_LIMIT,
    promotions::{data::PromotionsFilter, records::PromotionStatus},
};

use crate::{
    envelope::{self, ApiResponse},
    errors::unparsable,
    extensions::*,
    promotions::{self, PromotionResponse},
    state::State,
};

#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct AdminPromotionsQuery {
    /// `active`, `expired` or `cancelled`
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Every promotion, newest first. Overdue promotions are expired before listing.
#[endpoint(
    tags("admin"),
    summary = "List Promotions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    query: AdminPromotionsQuery,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<PromotionResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = query
        .status
        .as_deref()
        .map(str::parse::<PromotionStatus>)
        .transpose()
        .map_err(unparsable)?;

    let page = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .into_request(DEFAULT_PAGE_LIMIT)?;

    let page = state
        .app
        .promotions
        .list_promotions(PromotionsFilter { status, page })
        .await
        .map_err(promotions::into_status_error)?;

    Ok(envelope::page(page))
}
