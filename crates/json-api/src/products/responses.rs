//! Product Responses

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    products::{data::SaveToggle, records::ProductRecord},
    vendors::records::VendorSummary,
};

use crate::{categories::CategorySummaryResponse, uploads::ImageResponse};

/// The seller details shown next to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductVendorResponse {
    pub uuid: Uuid,
    pub business_name: String,
    pub city: String,
    pub country: String,
    pub logo_url: Option<String>,
    pub phone: String,
    pub whatsapp: Option<String>,
}

impl From<VendorSummary> for ProductVendorResponse {
    fn from(vendor: VendorSummary) -> Self {
        Self {
            uuid: vendor.uuid.into_uuid(),
            business_name: vendor.business_name,
            city: vendor.city,
            country: vendor.country,
            logo_url: vendor.logo_url,
            phone: vendor.phone,
            whatsapp: vendor.whatsapp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub vendor: ProductVendorResponse,
    pub category: CategorySummaryResponse,
    pub name: String,
    pub description: String,
    /// Price in minor currency units
    pub price: u64,
    pub stock: u64,
    pub images: Vec<ImageResponse>,
    /// `available`, `out-of-stock` or `discontinued`
    pub availability: String,
    pub is_promoted: bool,
    pub promotion_expires_at: Option<String>,
    pub views: u64,
    pub clicks: u64,
    pub saves: u64,
    pub tags: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            vendor: product.vendor.into(),
            category: product.category.into(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            images: product.images.into_iter().map(Into::into).collect(),
            availability: product.availability.to_string(),
            is_promoted: product.is_promoted,
            promotion_expires_at: product
                .promotion_expires_at
                .map(|expires_at| expires_at.to_string()),
            views: product.views,
            clicks: product.clicks,
            saves: product.saves,
            tags: product.tags.into_vec(),
            specifications: product.specifications,
            is_active: product.is_active,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Bookmark state after a save toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaveResponse {
    pub is_saved: bool,
    pub saves: u64,
}

impl From<SaveToggle> for SaveResponse {
    fn from(toggle: SaveToggle) -> Self {
        Self {
            is_saved: toggle.is_saved,
            saves: toggle.saves,
        }
    }
}
