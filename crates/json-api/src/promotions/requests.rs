//! Promotion Requests

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::promotions::{data::NewPromotion, records::PromotionKind};

use crate::errors::unparsable;

/// Create Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePromotionRequest {
    pub product: Uuid,
    /// `featured`, `boosted` or `premium`
    #[serde(rename = "type")]
    pub kind: String,
    /// RFC 3339. Defaults to now.
    #[serde(default)]
    pub starts_at: Option<String>,
    /// RFC 3339, after both the start and now
    pub ends_at: String,
    /// Price in minor currency units
    pub price: u64,
}

impl TryFrom<CreatePromotionRequest> for NewPromotion {
    type Error = StatusError;

    fn try_from(request: CreatePromotionRequest) -> Result<Self, Self::Error> {
        Ok(NewPromotion {
            product: request.product.into(),
            kind: request.kind.parse::<PromotionKind>().map_err(unparsable)?,
            starts_at: request
                .starts_at
                .as_deref()
                .map(str::parse::<Timestamp>)
                .transpose()
                .map_err(unparsable)?,
            ends_at: request.ends_at.parse::<Timestamp>().map_err(unparsable)?,
            price: request.price,
        })
    }
}
