//! Admin Product List Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use marketplace_app::domain::{pagination::DEFAULT_PAGE_LIMIT, products::data::ProductQuery};

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    products::{self, ProductResponse},
    state::State,
};

#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct AdminProductsQuery {
    /// Only active (`true`) or only hidden (`false`) products
    pub is_active: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Every product, including hidden ones and those of unapproved vendors.
#[endpoint(
    tags("admin"),
    summary = "List All Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    query: AdminProductsQuery,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageParams {
        page: query.page,
        limit: query.limit,
    }
    .into_request(DEFAULT_PAGE_LIMIT)?;

    let page = state
        .app
        .products
        .search_products(ProductQuery {
            is_active: query.is_active,
            page,
            ..ProductQuery::default()
        })
        .await
        .map_err(products::into_status_error)?;

    Ok(envelope::page(page))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use marketplace_app::domain::{
        pagination::Page, products::MockProductsService, users::records::Role,
    };

    use crate::test_helpers::{Mocks, user_service};

    use super::*;

    #[tokio::test]
    async fn test_list_hidden_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .withf(|query| {
                query.is_active == Some(false)
                    && !query.approved_vendors_only
                    && query.page.limit() == DEFAULT_PAGE_LIMIT
            })
            .return_once(|query| Ok(Page::new(Vec::new(), query.page, 0)));

        let res = TestClient::get("http://example.com/admin/products?is_active=false")
            .send(&user_service(
                Mocks {
                    products,
                    ..Mocks::default()
                },
                Role::Admin,
                Router::with_path("admin/products").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
