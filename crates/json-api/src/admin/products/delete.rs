//! Admin Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use marketplace_app::domain::products::data::Actor;

use crate::{
    envelope::{self, ApiMessage},
    extensions::*,
    products,
    state::State,
};

/// Remove any product, with its images.
#[endpoint(
    tags("admin"),
    summary = "Delete Any Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.products.delete",
    skip(product, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiMessage>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner().into();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    state
        .app
        .products
        .delete_product(Actor::Admin, product)
        .await
        .map_err(products::into_status_error)?;

    tracing::info!(product_uuid = %product, "admin deleted product");

    Ok(envelope::message("Product deleted successfully"))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use marketplace_app::domain::{
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
        users::records::Role,
    };

    use crate::test_helpers::{Mocks, user_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        user_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Role::Admin,
            Router::with_path("admin/products/{product}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_deletes_any_product() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .withf(move |actor, product| *actor == Actor::Admin && *product == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/admin/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_delete_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/admin/products/{}",
            ProductUuid::new()
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
