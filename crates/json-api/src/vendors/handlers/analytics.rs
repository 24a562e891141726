//! Vendor Analytics Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    vendors::{into_status_error, responses::AnalyticsResponse},
};

/// The caller's vendor counters with totals over their products.
#[endpoint(
    tags("vendors"),
    summary = "Vendor Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Analytics"),
        (status_code = StatusCode::NOT_FOUND, description = "No vendor profile yet"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<AnalyticsResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;

    let analytics = state
        .app
        .vendors
        .analytics(caller.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data_with_message(
        "Analytics retrieved",
        AnalyticsResponse::from(analytics),
    ))
}
