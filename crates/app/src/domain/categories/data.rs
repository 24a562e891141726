//! Categories Data

use crate::domain::{
    categories::records::{CategoryRecord, CategoryUuid},
    products::records::ProductRecord,
};

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub parent: Option<CategoryUuid>,
    pub is_active: bool,
}

/// Category Update Data. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// `Some(None)` detaches the category from its parent.
    pub parent: Option<Option<CategoryUuid>>,
    pub is_active: Option<bool>,
}

/// Categories can be addressed by UUID or by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryIdentifier {
    Uuid(CategoryUuid),
    Slug(String),
}

impl From<&str> for CategoryIdentifier {
    fn from(value: &str) -> Self {
        value
            .parse::<CategoryUuid>()
            .map_or_else(|_| Self::Slug(value.to_lowercase()), Self::Uuid)
    }
}

/// A category together with its newest active products.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetails {
    pub category: CategoryRecord,
    pub products: Vec<ProductRecord>,
}

/// Categories installed by `categories seed`: name, description, icon.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 6] = [
    ("Electronics", "Gadgets, phones, laptops and more", "💻"),
    ("Fashion", "Clothing, shoes, and accessories", "👗"),
    ("Home & Living", "Furniture, decor, and home essentials", "🏠"),
    ("Beauty & Health", "Cosmetics, skincare, and wellness", "💄"),
    ("Sports & Outdoors", "Equipment, gear, and activewear", "⚽"),
    ("Automotive", "Car parts, accessories, and tools", "🚗"),
];
