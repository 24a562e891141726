//! Category Records

use jiff::Timestamp;

use crate::{uploads::StoredImage, uuids::TypedUuid};

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<StoredImage>,
    pub parent: Option<CategorySummary>,
    pub is_active: bool,
    /// Number of active products in this category.
    pub product_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Name and slug of a category, as embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
}
