//! List Categories Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    categories::{errors::into_status_error, responses::CategoryResponse},
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
};

/// List Categories Handler
///
/// Sorted by name. Pass `active=true` to leave out hidden categories.
#[endpoint(
    tags("categories"),
    summary = "List Categories",
    responses((status_code = StatusCode::OK, description = "Categories")),
)]
pub(crate) async fn handler(
    active: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories(active.into_inner().unwrap_or(false))
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}
