//! Vendors Data

use crate::domain::{
    pagination::PageRequest,
    products::records::ProductRecord,
    vendors::records::{ContactInfo, Location, VendorOwner, VendorRecord, VendorStatus},
};

/// Business profile submitted by a vendor, used both to create and to update.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorProfile {
    pub business_name: String,
    pub description: Option<String>,
    pub location: Location,
    pub contact: ContactInfo,
}

/// Vendor listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorsFilter {
    pub status: Option<VendorStatus>,
    pub city: Option<String>,
    pub search: Option<String>,
    pub page: PageRequest,
}

/// A vendor together with the user who runs it.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorWithOwner {
    pub vendor: VendorRecord,
    pub owner: VendorOwner,
}

/// A vendor's public page.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicVendor {
    pub vendor: VendorRecord,
    pub products: Vec<ProductRecord>,
}

/// Aggregates over a vendor's own products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductTotals {
    pub total: u64,
    pub active: u64,
    pub promoted: u64,
    pub views: u64,
    pub clicks: u64,
    pub saves: u64,
}

/// Vendor dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorAnalytics {
    pub vendor: VendorRecord,
    pub products: ProductTotals,
}
