//! Admin Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::{
    dashboard::records::{DashboardStats, ProductStats, PromotionStats, UserStats, VendorStats},
    vendors::{data::VendorWithOwner, records::VendorOwner},
};

use crate::vendors::VendorResponse;

/// The account that runs a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorOwnerResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl From<VendorOwner> for VendorOwnerResponse {
    fn from(owner: VendorOwner) -> Self {
        Self {
            uuid: owner.uuid.into_uuid(),
            name: owner.name,
            email: owner.email,
            phone: owner.phone,
            is_active: owner.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminVendorResponse {
    pub vendor: VendorResponse,
    pub owner: VendorOwnerResponse,
}

impl From<VendorWithOwner> for AdminVendorResponse {
    fn from(row: VendorWithOwner) -> Self {
        Self {
            vendor: row.vendor.into(),
            owner: row.owner.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserStatsResponse {
    pub total: u64,
    pub customers: u64,
    pub vendors: u64,
    pub admins: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorStatsResponse {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub blocked: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStatsResponse {
    pub total: u64,
    pub active: u64,
    pub promoted: u64,
    pub out_of_stock: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionStatsResponse {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
}

/// Marketplace-wide counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardStatsResponse {
    pub users: UserStatsResponse,
    pub vendors: VendorStatsResponse,
    pub products: ProductStatsResponse,
    pub promotions: PromotionStatsResponse,
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            total: stats.total,
            customers: stats.customers,
            vendors: stats.vendors,
            admins: stats.admins,
            active: stats.active,
        }
    }
}

impl From<VendorStats> for VendorStatsResponse {
    fn from(stats: VendorStats) -> Self {
        Self {
            total: stats.total,
            approved: stats.approved,
            pending: stats.pending,
            blocked: stats.blocked,
        }
    }
}

impl From<ProductStats> for ProductStatsResponse {
    fn from(stats: ProductStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            promoted: stats.promoted,
            out_of_stock: stats.out_of_stock,
        }
    }
}

impl From<PromotionStats> for PromotionStatsResponse {
    fn from(stats: PromotionStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            expired: stats.expired,
        }
    }
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            users: stats.users.into(),
            vendors: stats.vendors.into(),
            products: stats.products.into(),
            promotions: stats.promotions.into(),
        }
    }
}
