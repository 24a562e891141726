//! Vendor Requests

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use marketplace_app::domain::vendors::{
    data::VendorProfile,
    records::{ContactInfo, Location},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationRequest {
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactInfoRequest {
    pub phone: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Business profile fields, shared by vendor sign up and profile updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorProfileRequest {
    pub business_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: LocationRequest,
    pub contact_info: ContactInfoRequest,
}

impl From<VendorProfileRequest> for VendorProfile {
    fn from(request: VendorProfileRequest) -> Self {
        let location = request.location;
        let contact = request.contact_info;

        VendorProfile {
            business_name: request.business_name,
            description: request.description,
            location: Location {
                address: location.address,
                city: location.city,
                state: location.state,
                country: location.country,
                latitude: location.latitude,
                longitude: location.longitude,
            },
            contact: ContactInfo {
                phone: contact.phone,
                whatsapp: contact.whatsapp,
                email: contact.email,
                website: contact.website,
            },
        }
    }
}
