//! Create Product Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    products::{data::NewProduct, records::Availability},
    validation::amount,
};

use crate::{
    envelope::{self, ApiResponse},
    errors::{invalid, unparsable},
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub category: Uuid,
    pub name: String,
    pub description: String,
    /// Price in minor currency units
    pub price: u64,
    #[serde(default)]
    pub stock: u64,
    /// Defaults to `available`
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        let availability = request
            .availability
            .as_deref()
            .map(str::parse::<Availability>)
            .transpose()
            .map_err(unparsable)?
            .unwrap_or_default();

        Ok(NewProduct {
            category: request.category.into(),
            name: request.name,
            description: request.description,
            price: amount("Price", request.price).map_err(|error| invalid(&error))?,
            stock: amount("Stock", request.stock).map_err(|error| invalid(&error))?,
            availability,
            tags: request.tags,
            specifications: request.specifications,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Vendor not approved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(vendor_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;
    let product = NewProduct::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));

    let created = state
        .app
        .products
        .create_product(vendor, product)
        .await
        .map_err(into_status_error)?;

    span.record("product_uuid", tracing::field::display(created.uuid));

    res.add_header(LOCATION, format!("/api/products/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %created.uuid, "created product");

    Ok(envelope::data_with_message(
        "Product created successfully",
        ProductResponse::from(created),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::{
        categories::records::CategoryUuid,
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
        vendors::records::VendorStatus,
    };

    use crate::test_helpers::{Mocks, TEST_VENDOR_UUID, make_product, vendor_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        vendor_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();
        let category = CategoryUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |vendor, new| {
                *vendor == TEST_VENDOR_UUID
                    && new.category == category
                    && new.name == "Desk Lamp"
                    && new.price == 2_500
                    && new.availability == Availability::Available
                    && new.tags == ["lamp"]
            })
            .return_once(move |_, _| Ok(make_product(uuid)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "category": category.into_uuid(),
                "name": "Desk Lamp",
                "description": "A warm desk lamp",
                "price": 2500,
                "stock": 3,
                "tags": ["lamp"]
            }))
            .send(&make_service(products))
            .await;

        let body: ApiResponse<ProductResponse> = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/products/{uuid}").as_str()));
        assert_eq!(body.message.as_deref(), Some("Product created successfully"));
        assert_eq!(body.data.map(|product| product.uuid), Some(uuid.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unknown_availability_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "category": CategoryUuid::new().into_uuid(),
                "name": "Desk Lamp",
                "description": "A warm desk lamp",
                "price": 2500,
                "availability": "someday"
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::InvalidReference));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "category": CategoryUuid::new().into_uuid(),
                "name": "Desk Lamp",
                "description": "A warm desk lamp",
                "price": 2500
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Category not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_for_blocked_vendor_returns_403() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| {
                Err(ProductsServiceError::VendorNotApproved(VendorStatus::Blocked))
            });

        let res = TestClient::post("http://example.com/products")
            .json(&json!({
                "category": CategoryUuid::new().into_uuid(),
                "name": "Desk Lamp",
                "description": "A warm desk lamp",
                "price": 2500
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_price_past_bigint_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "category": CategoryUuid::new().into_uuid(),
                "name": "Desk Lamp",
                "description": "A warm desk lamp",
                "price": u64::MAX
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Price is too large"));

        Ok(())
    }
}
