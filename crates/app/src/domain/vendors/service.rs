//! Vendors service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pagination::{Page, PageRequest},
        products::{data::ProductQuery, repository::PgProductsRepository},
        users::records::UserUuid,
        validation::{ValidationError, normalize_email, optional_text, required_text},
        vendors::{
            data::{PublicVendor, VendorAnalytics, VendorProfile, VendorWithOwner, VendorsFilter},
            errors::VendorsServiceError,
            records::{ContactInfo, Location, VendorRecord, VendorStatus, VendorUuid},
            repository::PgVendorsRepository,
        },
    },
    uploads::{self, ImageFolder, ImageStore, ImageUpload, StoredImage},
};

/// Products shown on a vendor's public page.
pub const PUBLIC_VENDOR_PRODUCT_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct PgVendorsService {
    db: Db,
    repository: PgVendorsRepository,
    products: PgProductsRepository,
    images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for PgVendorsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgVendorsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgVendorsService {
    #[must_use]
    pub fn new(db: Db, images: Arc<dyn ImageStore>) -> Self {
        Self {
            db,
            repository: PgVendorsRepository::new(),
            products: PgProductsRepository::new(),
            images,
        }
    }

    async fn attach_logo(
        &self,
        mut tx: Transaction<'static, Postgres>,
        vendor: VendorUuid,
        logo: &StoredImage,
    ) -> Result<VendorRecord, sqlx::Error> {
        let updated = self.repository.update_logo(&mut tx, vendor, logo).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

fn validate_coordinate(
    field: &str,
    value: Option<f64>,
    bound: f64,
) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v.abs() > bound => Err(ValidationError::new(format!(
            "{field} must be between -{bound} and {bound}"
        ))),
        other => Ok(other),
    }
}

pub(crate) fn validate_profile(profile: VendorProfile) -> Result<VendorProfile, ValidationError> {
    let VendorProfile {
        business_name,
        description,
        location,
        contact,
    } = profile;

    Ok(VendorProfile {
        business_name: required_text("Business name", &business_name, 200)?,
        description: optional_text("Description", description.as_deref(), 1000)?,
        location: Location {
            address: required_text("Address", &location.address, 300)?,
            city: required_text("City", &location.city, 100)?,
            state: optional_text("State", location.state.as_deref(), 100)?,
            country: required_text("Country", &location.country, 100)?,
            latitude: validate_coordinate("Latitude", location.latitude, 90.0)?,
            longitude: validate_coordinate("Longitude", location.longitude, 180.0)?,
        },
        contact: ContactInfo {
            phone: required_text("Phone", &contact.phone, 40)?,
            whatsapp: optional_text("WhatsApp", contact.whatsapp.as_deref(), 40)?,
            email: contact
                .email
                .as_deref()
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(normalize_email)
                .transpose()?,
            website: optional_text("Website", contact.website.as_deref(), 300)?,
        },
    })
}

#[async_trait]
impl VendorsService for PgVendorsService {
    async fn get_vendor_for_user(&self, user: UserUuid) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self
            .repository
            .find_vendor_by_user(&mut tx, user)
            .await?
            .ok_or(VendorsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(vendor)
    }

    async fn upsert_profile(
        &self,
        user: UserUuid,
        profile: VendorProfile,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let profile = validate_profile(profile)?;

        let mut tx = self.db.begin().await?;

        let vendor = self.repository.upsert_vendor(&mut tx, user, &profile).await?;

        tx.commit().await?;

        info!(vendor = %vendor.uuid, "saved vendor profile");

        Ok(vendor)
    }

    async fn replace_logo(
        &self,
        user: UserUuid,
        upload: ImageUpload,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .find_vendor_by_user(&mut tx, user)
            .await?
            .ok_or(VendorsServiceError::NotFound)?;

        let logo = self.images.store(ImageFolder::Vendors, &upload).await?;

        let updated = match self.attach_logo(tx, current.uuid, &logo).await {
            Ok(updated) => updated,
            Err(error) => {
                uploads::discard(self.images.as_ref(), ImageFolder::Vendors, &[logo]).await;

                return Err(error.into());
            }
        };

        if let Some(previous) = current.logo {
            uploads::discard(self.images.as_ref(), ImageFolder::Vendors, &[previous]).await;
        }

        Ok(updated)
    }

    async fn get_public_vendor(
        &self,
        vendor: VendorUuid,
    ) -> Result<PublicVendor, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.record_profile_view(&mut tx, vendor).await?;

        let (products, _) = self
            .products
            .search_products(
                &mut tx,
                &ProductQuery {
                    vendor: Some(vendor.uuid),
                    is_active: Some(true),
                    page: PageRequest::first(PUBLIC_VENDOR_PRODUCT_LIMIT),
                    ..ProductQuery::default()
                },
            )
            .await?;

        tx.commit().await?;

        Ok(PublicVendor { vendor, products })
    }

    async fn list_vendors(
        &self,
        filter: VendorsFilter,
    ) -> Result<Page<VendorRecord>, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let (vendors, total) = self.repository.list_vendors(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(Page::new(vendors, filter.page, total))
    }

    async fn list_vendors_with_owners(
        &self,
        filter: VendorsFilter,
    ) -> Result<Page<VendorWithOwner>, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let (vendors, total) = self
            .repository
            .list_vendors_with_owners(&mut tx, &filter)
            .await?;

        tx.commit().await?;

        Ok(Page::new(vendors, filter.page, total))
    }

    async fn analytics(&self, user: UserUuid) -> Result<VendorAnalytics, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self
            .repository
            .find_vendor_by_user(&mut tx, user)
            .await?
            .ok_or(VendorsServiceError::NotFound)?;

        let products = self.repository.product_totals(&mut tx, vendor.uuid).await?;

        tx.commit().await?;

        Ok(VendorAnalytics { vendor, products })
    }

    async fn set_status(
        &self,
        vendor: VendorUuid,
        status: VendorStatus,
    ) -> Result<VendorRecord, VendorsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.update_status(&mut tx, vendor, status).await?;

        tx.commit().await?;

        info!(vendor = %vendor.uuid, status = status.as_str(), "updated vendor status");

        Ok(vendor)
    }
}

#[automock]
#[async_trait]
pub trait VendorsService: Send + Sync {
    /// Retrieve the vendor profile owned by a user.
    async fn get_vendor_for_user(&self, user: UserUuid) -> Result<VendorRecord, VendorsServiceError>;

    /// Create the caller's vendor profile, or replace its business details.
    async fn upsert_profile(
        &self,
        user: UserUuid,
        profile: VendorProfile,
    ) -> Result<VendorRecord, VendorsServiceError>;

    /// Store a new logo and remove the previous one.
    async fn replace_logo(
        &self,
        user: UserUuid,
        upload: ImageUpload,
    ) -> Result<VendorRecord, VendorsServiceError>;

    /// Public vendor page. Counts a profile view.
    async fn get_public_vendor(&self, vendor: VendorUuid)
    -> Result<PublicVendor, VendorsServiceError>;

    /// List vendors, newest first.
    async fn list_vendors(
        &self,
        filter: VendorsFilter,
    ) -> Result<Page<VendorRecord>, VendorsServiceError>;

    /// The admin listing: same filters, with each vendor's owner account.
    async fn list_vendors_with_owners(
        &self,
        filter: VendorsFilter,
    ) -> Result<Page<VendorWithOwner>, VendorsServiceError>;

    /// Vendor counters plus aggregates over the vendor's products.
    async fn analytics(&self, user: UserUuid) -> Result<VendorAnalytics, VendorsServiceError>;

    /// Approve, block or reset a vendor.
    async fn set_status(
        &self,
        vendor: VendorUuid,
        status: VendorStatus,
    ) -> Result<VendorRecord, VendorsServiceError>;
}
