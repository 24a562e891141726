//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    categories::errors::into_status_error,
    envelope::{self, ApiMessage},
    extensions::*,
    state::State,
};

/// Delete Category Handler
///
/// Refused while any product is still filed under the category.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Category still has products"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
#[tracing::instrument(
    name = "categories.delete",
    skip(category, depot),
    fields(category_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner().into();

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    state
        .app
        .categories
        .delete_category(category)
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_uuid = %category, "deleted category");

    Ok(envelope::message("Category deleted successfully"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::{
        categories::{CategoriesServiceError, MockCategoriesService, records::CategoryUuid},
        users::records::Role,
    };

    use crate::test_helpers::{Mocks, user_service};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        user_service(
            Mocks {
                categories,
                ..Mocks::default()
            },
            Role::Admin,
            Router::with_path("categories/{category}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_empty_category() -> TestResult {
        let uuid = CategoryUuid::new();
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .withf(move |category| *category == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/categories/{uuid}"))
            .send(&make_service(categories))
            .await;

        let body: ApiMessage = res.take_json().await?;

        assert_eq!(body.message, "Category deleted successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_with_products_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::HasProducts(2)));

        let mut res = TestClient::delete(format!(
            "http://example.com/categories/{}",
            CategoryUuid::new()
        ))
        .send(&make_service(categories))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.take_string()
                .await?
                .contains("Cannot delete category with 2 existing products")
        );

        Ok(())
    }
}
