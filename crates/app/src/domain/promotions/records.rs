//! Promotion Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{products::records::ProductUuid, vendors::records::VendorUuid},
    uuids::TypedUuid,
};

/// Promotion UUID
pub type PromotionUuid = TypedUuid<PromotionRecord>;

/// Placement bought by a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    Featured,
    Boosted,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    Active,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownPromotionValue {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownPromotionValue;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($name => Ok(Self::$variant),)+
                    other => Err(UnknownPromotionValue {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(PromotionKind, "promotion type", {
    Featured => "featured",
    Boosted => "boosted",
    Premium => "premium",
});

string_enum!(PromotionStatus, "promotion status", {
    Active => "active",
    Expired => "expired",
    Cancelled => "cancelled",
});

string_enum!(PaymentStatus, "payment status", {
    Pending => "pending",
    Paid => "paid",
    Refunded => "refunded",
});

/// The promoted product, as shown on promotion listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotedProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
}

/// The paying vendor, as shown on promotion listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotingVendor {
    pub uuid: VendorUuid,
    pub business_name: String,
}

/// Promotion Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRecord {
    pub uuid: PromotionUuid,
    pub product: PromotedProduct,
    pub vendor: PromotingVendor,
    pub kind: PromotionKind,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: PromotionStatus,
    /// Price in minor currency units.
    pub price: u64,
    pub payment_status: PaymentStatus,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromotionRecord {
    /// Status as of `now`: an active promotion past its end reads as expired.
    pub fn effective_status(&self, now: Timestamp) -> PromotionStatus {
        match self.status {
            PromotionStatus::Active if self.ends_at <= now => PromotionStatus::Expired,
            status => status,
        }
    }
}
