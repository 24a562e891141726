//! Promotion Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::promotions::records::{
    PromotedProduct, PromotingVendor, PromotionRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotedProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub price: u64,
}

impl From<PromotedProduct> for PromotedProductResponse {
    fn from(product: PromotedProduct) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            price: product.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotingVendorResponse {
    pub uuid: Uuid,
    pub business_name: String,
}

impl From<PromotingVendor> for PromotingVendorResponse {
    fn from(vendor: PromotingVendor) -> Self {
        Self {
            uuid: vendor.uuid.into_uuid(),
            business_name: vendor.business_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionResponse {
    pub uuid: Uuid,
    pub product: PromotedProductResponse,
    pub vendor: PromotingVendorResponse,
    /// `featured`, `boosted` or `premium`
    #[serde(rename = "type")]
    pub kind: String,
    pub starts_at: String,
    pub ends_at: String,
    /// `active`, `expired` or `cancelled`
    pub status: String,
    /// Price in minor currency units
    pub price: u64,
    /// `pending`, `paid` or `refunded`
    pub payment_status: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PromotionRecord> for PromotionResponse {
    fn from(promotion: PromotionRecord) -> Self {
        Self {
            uuid: promotion.uuid.into_uuid(),
            product: promotion.product.into(),
            vendor: promotion.vendor.into(),
            kind: promotion.kind.to_string(),
            starts_at: promotion.starts_at.to_string(),
            ends_at: promotion.ends_at.to_string(),
            status: promotion.status.to_string(),
            price: promotion.price,
            payment_status: promotion.payment_status.to_string(),
            impressions: promotion.impressions,
            clicks: promotion.clicks,
            conversions: promotion.conversions,
            created_at: promotion.created_at.to_string(),
            updated_at: promotion.updated_at.to_string(),
        }
    }
}
