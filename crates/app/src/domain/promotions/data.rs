//! Promotions Data

use jiff::Timestamp;

use crate::domain::{
    pagination::PageRequest,
    products::records::ProductUuid,
    promotions::records::{PromotionKind, PromotionStatus},
};

/// New Promotion Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromotion {
    pub product: ProductUuid,
    pub kind: PromotionKind,
    /// Defaults to the time of creation.
    pub starts_at: Option<Timestamp>,
    pub ends_at: Timestamp,
    /// Price in minor currency units.
    pub price: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionsFilter {
    pub status: Option<PromotionStatus>,
    pub page: PageRequest,
}
