//! Update Product Handler

use std::{collections::BTreeMap, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    products::{data::ProductUpdate, records::Availability},
    validation::amount,
};

use crate::{
    envelope::{self, ApiResponse},
    errors::{invalid, unparsable},
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Update Product Request. Omitted fields keep their value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub stock: Option<u64>,
    #[serde(default)]
    pub availability: Option<String>,
    /// Replaces every tag
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Replaces every specification
    #[serde(default)]
    pub specifications: Option<BTreeMap<String, String>>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            category: request.category.map(Into::into),
            name: request.name,
            description: request.description,
            price: request
                .price
                .map(|price| amount("Price", price))
                .transpose()
                .map_err(|error| invalid(&error))?,
            stock: request
                .stock
                .map(|stock| amount("Stock", stock))
                .transpose()
                .map_err(|error| invalid(&error))?,
            availability: request
                .availability
                .as_deref()
                .map(str::parse::<Availability>)
                .transpose()
                .map_err(unparsable)?,
            tags: request.tags,
            specifications: request.specifications,
        })
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the product's vendor"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(vendor_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;
    let product = product.into_inner().into();
    let update = ProductUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));
    span.record("product_uuid", tracing::field::display(product));

    let updated = state
        .app
        .products
        .update_product(vendor, product, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %updated.uuid, "updated product");

    Ok(envelope::data_with_message(
        "Product updated successfully",
        ProductResponse::from(updated),
    ))
}
