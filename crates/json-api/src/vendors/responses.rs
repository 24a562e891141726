//! Vendor Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::vendors::{
    data::{ProductTotals, PublicVendor, VendorAnalytics},
    records::{ContactInfo, Location, Rating, VendorRecord},
};

use crate::{products::ProductResponse, uploads::ImageResponse};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationResponse {
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            address: location.address,
            city: location.city,
            state: location.state,
            country: location.country,
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactInfoResponse {
    pub phone: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl From<ContactInfo> for ContactInfoResponse {
    fn from(contact: ContactInfo) -> Self {
        Self {
            phone: contact.phone,
            whatsapp: contact.whatsapp,
            email: contact.email,
            website: contact.website,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    pub average: f64,
    pub count: u64,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            average: rating.average,
            count: rating.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub business_name: String,
    pub description: Option<String>,
    pub logo: Option<ImageResponse>,
    pub location: LocationResponse,
    pub contact_info: ContactInfoResponse,
    /// `pending`, `approved` or `blocked`
    pub status: String,
    pub rating: RatingResponse,
    pub total_products: u64,
    pub total_sales: u64,
    pub profile_views: u64,
    pub total_clicks: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VendorRecord> for VendorResponse {
    fn from(vendor: VendorRecord) -> Self {
        Self {
            uuid: vendor.uuid.into_uuid(),
            user_uuid: vendor.user_uuid.into_uuid(),
            business_name: vendor.business_name,
            description: vendor.description,
            logo: vendor.logo.map(Into::into),
            location: vendor.location.into(),
            contact_info: vendor.contact.into(),
            status: vendor.status.to_string(),
            rating: vendor.rating.into(),
            total_products: vendor.total_products,
            total_sales: vendor.total_sales,
            profile_views: vendor.profile_views,
            total_clicks: vendor.total_clicks,
            created_at: vendor.created_at.to_string(),
            updated_at: vendor.updated_at.to_string(),
        }
    }
}

/// A vendor's public page: the vendor and its newest active products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublicVendorResponse {
    pub vendor: VendorResponse,
    pub products: Vec<ProductResponse>,
}

impl From<PublicVendor> for PublicVendorResponse {
    fn from(page: PublicVendor) -> Self {
        Self {
            vendor: page.vendor.into(),
            products: page.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductTotalsResponse {
    pub total: u64,
    /// Active and available
    pub active: u64,
    pub promoted: u64,
    pub views: u64,
    pub clicks: u64,
    pub saves: u64,
}

impl From<ProductTotals> for ProductTotalsResponse {
    fn from(totals: ProductTotals) -> Self {
        Self {
            total: totals.total,
            active: totals.active,
            promoted: totals.promoted,
            views: totals.views,
            clicks: totals.clicks,
            saves: totals.saves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AnalyticsResponse {
    pub vendor: VendorResponse,
    pub products: ProductTotalsResponse,
}

impl From<VendorAnalytics> for AnalyticsResponse {
    fn from(analytics: VendorAnalytics) -> Self {
        Self {
            vendor: analytics.vendor.into(),
            products: analytics.products.into(),
        }
    }
}
