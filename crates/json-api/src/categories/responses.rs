//! Category Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::categories::{
    data::CategoryDetails,
    records::{CategoryRecord, CategorySummary},
};

use crate::{products::ProductResponse, uploads::ImageResponse};

/// Name and slug of a related category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategorySummaryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<CategorySummary> for CategorySummaryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            uuid: summary.uuid.into_uuid(),
            name: summary.name,
            slug: summary.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<ImageResponse>,
    pub parent: Option<CategorySummaryResponse>,
    pub is_active: bool,
    /// Active products in this category
    pub product_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            icon: category.icon,
            image: category.image.map(Into::into),
            parent: category.parent.map(Into::into),
            is_active: category.is_active,
            product_count: category.product_count,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

/// A category page: the category and its newest active products.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryDetailsResponse {
    pub category: CategoryResponse,
    pub products: Vec<ProductResponse>,
}

impl From<CategoryDetails> for CategoryDetailsResponse {
    fn from(details: CategoryDetails) -> Self {
        Self {
            category: details.category.into(),
            products: details.products.into_iter().map(Into::into).collect(),
        }
    }
}
