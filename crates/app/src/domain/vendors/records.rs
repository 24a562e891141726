//! Vendor Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::users::records::UserUuid, uploads::StoredImage, uuids::TypedUuid};

/// Vendor UUID
pub type VendorUuid = TypedUuid<VendorRecord>;

/// Moderation state of a vendor account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorStatus {
    Pending,
    Approved,
    Blocked,
}

impl VendorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vendor status: {0}")]
pub struct UnknownVendorStatus(pub String);

impl FromStr for VendorStatus {
    type Err = UnknownVendorStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "blocked" => Ok(Self::Blocked),
            other => Err(UnknownVendorStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub count: u64,
}

/// Vendor Record
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRecord {
    pub uuid: VendorUuid,
    pub user_uuid: UserUuid,
    pub business_name: String,
    pub description: Option<String>,
    pub logo: Option<StoredImage>,
    pub location: Location,
    pub contact: ContactInfo,
    pub status: VendorStatus,
    pub rating: Rating,
    pub total_products: u64,
    pub total_sales: u64,
    pub profile_views: u64,
    pub total_clicks: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VendorRecord {
    pub fn is_approved(&self) -> bool {
        self.status == VendorStatus::Approved
    }
}

/// The account behind a vendor, as admins see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorOwner {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// The slice of a vendor shown next to each of its products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSummary {
    pub uuid: VendorUuid,
    pub business_name: String,
    pub city: String,
    pub country: String,
    pub logo_url: Option<String>,
    pub phone: String,
    pub whatsapp: Option<String>,
}
