//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::categories::data::NewCategory;

use crate::{
    categories::{errors::into_status_error, responses::CategoryResponse},
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
};

const fn active_by_default() -> bool {
    true
}

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub parent: Option<Uuid>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            name: request.name,
            description: request.description,
            icon: request.icon,
            parent: request.parent.map(Into::into),
            is_active: request.is_active,
        }
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "categories.create",
    skip(json, depot, res),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("category_uuid", tracing::field::display(category.uuid));

    res.add_header(LOCATION, format!("/api/categories/{}", category.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(slug = %category.slug, "created category");

    Ok(envelope::data_with_message(
        "Category created successfully",
        CategoryResponse::from(category),
    ))
}
