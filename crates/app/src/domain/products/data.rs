//! Products Data

use std::{collections::BTreeMap, fmt, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::domain::{
    categories::records::CategoryUuid,
    pagination::PageRequest,
    products::records::{Availability, Tags},
    validation::{ValidationError, required_text},
    vendors::records::VendorUuid,
};

/// Page size of the public catalog.
pub const CATALOG_PAGE_LIMIT: u32 = 12;

const MAX_TAGS: usize = 20;
const MAX_TAG_CHARS: usize = 50;
const MAX_SPECIFICATIONS: usize = 50;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub category: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock: u64,
    pub availability: Availability,
    pub tags: Vec<String>,
    pub specifications: BTreeMap<String, String>,
}

/// Product Update Data. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub category: Option<CategoryUuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u64>,
    pub availability: Option<Availability>,
    pub tags: Option<Vec<String>>,
    pub specifications: Option<BTreeMap<String, String>>,
}

/// Catalog ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    Popular,
}

impl ProductSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSort(pub String);

impl FromStr for ProductSort {
    type Err = UnknownSort;

    /// Accepts both the named orders and mongoose-style field specs such as `-price`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" | "-createdAt" | "-created_at" => Ok(Self::Newest),
            "oldest" | "createdAt" | "created_at" => Ok(Self::Oldest),
            "price_asc" | "price" => Ok(Self::PriceAsc),
            "price_desc" | "-price" => Ok(Self::PriceDesc),
            "name_asc" | "name" => Ok(Self::NameAsc),
            "name_desc" | "-name" => Ok(Self::NameDesc),
            "popular" | "-views" => Ok(Self::Popular),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// Catalog query. Every filter is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Full-text search over name, tags and description.
    pub search: Option<String>,
    pub category: Option<CategoryUuid>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    /// Case-insensitive substring of the vendor's city.
    pub city: Option<String>,
    pub availability: Option<Availability>,
    /// Only products whose promotion is currently running.
    pub promoted_only: bool,
    pub vendor: Option<VendorUuid>,
    pub is_active: Option<bool>,
    /// Hide products of vendors that are pending or blocked.
    pub approved_vendors_only: bool,
    pub sort: ProductSort,
    pub page: PageRequest,
}

impl ProductQuery {
    /// The query anonymous shoppers run: active products of approved vendors.
    #[must_use]
    pub fn public(page: PageRequest) -> Self {
        Self {
            is_active: Some(true),
            approved_vendors_only: true,
            page,
            ..Self::default()
        }
    }
}

/// Who is acting on a product. Admins bypass ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Public,
    Vendor(VendorUuid),
    Admin,
}

impl Actor {
    /// Whether this actor may see or manage products owned by `owner`.
    pub fn can_manage(self, owner: VendorUuid) -> bool {
        match self {
            Self::Admin => true,
            Self::Vendor(vendor) => vendor == owner,
            Self::Public => false,
        }
    }
}

/// Result of toggling a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveToggle {
    pub is_saved: bool,
    pub saves: u64,
}

/// Trim tags, drop empties, and remove duplicates while keeping first-seen order.
pub(crate) fn normalize_tags(tags: &[String]) -> Result<Tags, ValidationError> {
    let mut seen = FxHashSet::default();
    let mut normalized = Tags::new();

    for tag in tags.iter().map(|tag| tag.trim()).filter(|tag| !tag.is_empty()) {
        if tag.chars().count() > MAX_TAG_CHARS {
            return Err(ValidationError::new(format!(
                "Tags cannot exceed {MAX_TAG_CHARS} characters"
            )));
        }

        if seen.insert(tag.to_lowercase()) {
            normalized.push(tag.to_owned());
        }
    }

    if normalized.len() > MAX_TAGS {
        return Err(ValidationError::new(format!(
            "A product can have at most {MAX_TAGS} tags"
        )));
    }

    Ok(normalized)
}

/// Trim specification keys and values, rejecting blank keys.
pub(crate) fn normalize_specifications(
    specifications: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ValidationError> {
    if specifications.len() > MAX_SPECIFICATIONS {
        return Err(ValidationError::new(format!(
            "A product can have at most {MAX_SPECIFICATIONS} specifications"
        )));
    }

    specifications
        .into_iter()
        .map(|(key, value)| {
            let key = required_text("Specification name", &key, 100)?;
            let value = value.trim();

            if value.chars().count() > 500 {
                return Err(ValidationError::new(
                    "Specification values cannot exceed 500 characters",
                ));
            }

            Ok((key, value.to_owned()))
        })
        .collect()
}
