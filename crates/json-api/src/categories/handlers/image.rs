//! Category Image Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    categories::{errors::into_status_error, responses::CategoryResponse},
    envelope::{self, ApiResponse},
    extensions::*,
    observability::{self, Event},
    state::State,
    uploads,
};

/// Replace Category Image Handler
///
/// Takes `multipart/form-data` with one `image`. The previous image is deleted.
#[endpoint(
    tags("categories"),
    summary = "Replace Category Image",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Image replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "No image, or a rejected file"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
#[tracing::instrument(
    name = "categories.image",
    skip(category, req, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner().into();
    let upload = uploads::file(req, "image", "Please upload an image").await?;

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    let updated = state
        .app
        .categories
        .replace_image(category, upload)
        .await
        .map_err(into_status_error)?;

    observability::record(Event::ImageUploaded);

    Ok(envelope::data_with_message(
        "Image uploaded successfully",
        CategoryResponse::from(updated),
    ))
}
