//! Product Records

use std::{collections::BTreeMap, fmt, str::FromStr};

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    domain::{categories::records::CategorySummary, vendors::records::VendorSummary},
    uploads::StoredImage,
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product tags. Most products carry only a handful.
pub type Tags = SmallVec<[String; 4]>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Availability {
    #[default]
    Available,
    OutOfStock,
    Discontinued,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OutOfStock => "out-of-stock",
            Self::Discontinued => "discontinued",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown availability: {0}")]
pub struct UnknownAvailability(pub String);

impl FromStr for Availability {
    type Err = UnknownAvailability;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "out-of-stock" => Ok(Self::OutOfStock),
            "discontinued" => Ok(Self::Discontinued),
            other => Err(UnknownAvailability(other.to_string())),
        }
    }
}

/// Product Record, joined with its vendor and category.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub vendor: VendorSummary,
    pub category: CategorySummary,
    pub name: String,
    pub description: String,
    /// Price in minor currency units.
    pub price: u64,
    pub stock: u64,
    pub images: Vec<StoredImage>,
    pub availability: Availability,
    pub is_promoted: bool,
    pub promotion_expires_at: Option<Timestamp>,
    pub views: u64,
    pub clicks: u64,
    pub saves: u64,
    pub tags: Tags,
    pub specifications: BTreeMap<String, String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Promoted, and either open-ended or not yet expired at `now`.
    pub fn is_promotion_active(&self, now: Timestamp) -> bool {
        self.is_promoted
            && self
                .promotion_expires_at
                .is_none_or(|expires_at| now < expires_at)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use crate::{
        domain::{categories::records::CategoryUuid, vendors::records::VendorUuid},
        test::helpers::make_product,
    };

    use super::*;

    #[test]
    fn availability_uses_hyphenated_names() {
        assert_eq!(Availability::OutOfStock.as_str(), "out-of-stock");
        assert_eq!("out-of-stock".parse(), Ok(Availability::OutOfStock));
        assert!("sold-out".parse::<Availability>().is_err());
    }

    #[test]
    fn promotion_without_expiry_is_active() {
        let mut product = make_product(ProductUuid::new(), VendorUuid::new(), CategoryUuid::new());
        product.is_promoted = true;

        assert!(product.is_promotion_active(Timestamp::now()));
    }

    #[test]
    fn promotion_expires_at_expiry() {
        let now = Timestamp::now();
        let mut product = make_product(ProductUuid::new(), VendorUuid::new(), CategoryUuid::new());
        product.is_promoted = true;
        product.promotion_expires_at = Some(now);

        assert!(!product.is_promotion_active(now));
        assert!(product.is_promotion_active(now - SignedDuration::from_secs(1)));
    }

    #[test]
    fn unpromoted_product_is_never_active() {
        let product = make_product(ProductUuid::new(), VendorUuid::new(), CategoryUuid::new());

        assert!(!product.is_promotion_active(Timestamp::now()));
    }
}
