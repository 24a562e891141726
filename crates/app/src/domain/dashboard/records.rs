//! Dashboard Records

use sqlx::{FromRow, postgres::PgRow};

use crate::domain::rows::try_get_u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: u64,
    pub customers: u64,
    pub vendors: u64,
    pub admins: u64,
    pub active: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub blocked: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub total: u64,
    pub active: u64,
    pub promoted: u64,
    pub out_of_stock: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionStats {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
}

/// Marketplace-wide counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: UserStats,
    pub vendors: VendorStats,
    pub products: ProductStats,
    pub promotions: PromotionStats,
}

impl<'r> FromRow<'r, PgRow> for DashboardStats {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            users: UserStats {
                total: try_get_u64(row, "users_total")?,
                customers: try_get_u64(row, "users_customers")?,
                vendors: try_get_u64(row, "users_vendors")?,
                admins: try_get_u64(row, "users_admins")?,
                active: try_get_u64(row, "users_active")?,
            },
            vendors: VendorStats {
                total: try_get_u64(row, "vendors_total")?,
                approved: try_get_u64(row, "vendors_approved")?,
                pending: try_get_u64(row, "vendors_pending")?,
                blocked: try_get_u64(row, "vendors_blocked")?,
            },
            products: ProductStats {
                total: try_get_u64(row, "products_total")?,
                active: try_get_u64(row, "products_active")?,
                promoted: try_get_u64(row, "products_promoted")?,
                out_of_stock: try_get_u64(row, "products_out_of_stock")?,
            },
            promotions: PromotionStats {
                total: try_get_u64(row, "promotions_total")?,
                active: try_get_u64(row, "promotions_active")?,
                expired: try_get_u64(row, "promotions_expired")?,
            },
        })
    }
}
