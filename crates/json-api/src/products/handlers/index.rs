//! Product Catalog Handler

use std::sync::Arc;

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;
use uuid::Uuid;

use marketplace_app::domain::{
    products::{
        data::{CATALOG_PAGE_LIMIT, ProductQuery, ProductSort},
        records::Availability,
    },
    validation::amount,
};

use crate::{
    envelope::{self, ApiResponse},
    errors::{invalid, unparsable},
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Catalog filters. Every filter is optional and they combine.
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct ProductsQuery {
    /// Text searched in name, description and tags
    pub search: Option<String>,
    pub category: Option<Uuid>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    /// Vendor city, matched case-insensitively
    pub city: Option<String>,
    /// `available`, `out-of-stock` or `discontinued`
    pub availability: Option<String>,
    /// Only products with a running promotion
    pub promoted: Option<bool>,
    pub vendor: Option<Uuid>,
    /// `newest`, `oldest`, `price_asc`, `price_desc`, `name_asc`, `name_desc` or `popular`
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductsQuery {
    fn into_query(self) -> Result<ProductQuery, StatusError> {
        let page = PageParams {
            page: self.page,
            limit: self.limit,
        }
        .into_request(CATALOG_PAGE_LIMIT)?;

        let availability = self
            .availability
            .as_deref()
            .map(str::parse::<Availability>)
            .transpose()
            .map_err(unparsable)?;

        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<ProductSort>)
            .transpose()
            .map_err(unparsable)?
            .unwrap_or_default();

        Ok(ProductQuery {
            search: self.search.filter(|search| !search.trim().is_empty()),
            category: self.category.map(Into::into),
            min_price: price_bound("Minimum price", self.min_price)?,
            max_price: price_bound("Maximum price", self.max_price)?,
            city: self.city.filter(|city| !city.trim().is_empty()),
            availability,
            promoted_only: self.promoted.unwrap_or(false),
            vendor: self.vendor.map(Into::into),
            sort,
            ..ProductQuery::public(page)
        })
    }
}

fn price_bound(field: &str, value: Option<u64>) -> Result<Option<u64>, StatusError> {
    value
        .map(|price| amount(field, price))
        .transpose()
        .map_err(|error| invalid(&error))
}

/// Product Catalog Handler
///
/// Only active products of approved vendors are listed, whoever is asking.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Product page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    query: ProductsQuery,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .products
        .search_products(query.into_query()?)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::page(page))
}
