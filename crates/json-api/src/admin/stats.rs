//! Dashboard Statistics Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::responses::DashboardStatsResponse,
    envelope::{self, ApiResponse},
    errors::storage_failed,
    extensions::*,
    state::State,
};

/// Counts of users, vendors, products and promotions.
#[endpoint(
    tags("admin"),
    summary = "Dashboard Statistics",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Statistics"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<DashboardStatsResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .dashboard
        .stats()
        .await
        .map_err(|error| storage_failed("failed to count dashboard statistics", &error))?;

    Ok(envelope::data_with_message(
        "Dashboard statistics retrieved",
        DashboardStatsResponse::from(stats),
    ))
}
