//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use marketplace_app::domain::categories::data::CategoryUpdate;

use crate::{
    categories::{errors::into_status_error, responses::CategoryResponse},
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
};

/// Tells an explicit `null` apart from an omitted field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Update Category Request. Omitted fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// `null` makes the category top-level
    #[serde(default, deserialize_with = "present")]
    pub parent: Option<Option<Uuid>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            description: request.description,
            icon: request.icon,
            parent: request.parent.map(|parent| parent.map(Into::into)),
            is_active: request.is_active,
        }
    }
}

/// Update Category Handler
///
/// Renaming recomputes the slug.
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
#[tracing::instrument(
    name = "categories.update",
    skip(category, json, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner().into();

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    let updated = state
        .app
        .categories
        .update_category(category, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(slug = %updated.slug, "updated category");

    Ok(envelope::data_with_message(
        "Category updated successfully",
        CategoryResponse::from(updated),
    ))
}
