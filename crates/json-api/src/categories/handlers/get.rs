//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::categories::data::CategoryIdentifier;

use crate::{
    categories::{errors::into_status_error, responses::CategoryDetailsResponse},
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
};

/// Get Category Handler
///
/// `category` is either the UUID or the slug. Includes the newest active products.
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CategoryDetailsResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identifier = CategoryIdentifier::from(category.into_inner().as_str());

    let details = state
        .app
        .categories
        .get_category(identifier)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data(CategoryDetailsResponse::from(details)))
}
