//! Promotions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    auth::ensure_owner,
    database::Db,
    domain::{
        pagination::{Page, PageRequest},
        products::{data::Actor, repository::PgProductsRepository},
        promotions::{
            data::{NewPromotion, PromotionsFilter},
            errors::PromotionsServiceError,
            records::{PaymentStatus, PromotionRecord, PromotionStatus, PromotionUuid},
            repository::PgPromotionsRepository,
        },
        validation::ValidationError,
        vendors::{
            records::{VendorStatus, VendorUuid},
            repository::PgVendorsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
    products: PgProductsRepository,
    vendors: PgVendorsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
            products: PgProductsRepository::new(),
            vendors: PgVendorsRepository::new(),
        }
    }
}

fn validate_window(
    starts_at: Timestamp,
    ends_at: Timestamp,
    now: Timestamp,
) -> Result<(), ValidationError> {
    if ends_at <= starts_at {
        return Err(ValidationError::new("End date must be after the start date"));
    }

    if ends_at <= now {
        return Err(ValidationError::new("End date must be in the future"));
    }

    Ok(())
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    async fn create_promotion(
        &self,
        vendor: VendorUuid,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let now = Timestamp::now();
        let starts_at = promotion.starts_at.unwrap_or(now);

        validate_window(starts_at, promotion.ends_at, now)?;

        let uuid = PromotionUuid::new();

        let mut tx = self.db.begin().await?;

        let owner = self.vendors.get_vendor(&mut tx, vendor).await?;

        if owner.status != VendorStatus::Approved {
            return Err(PromotionsServiceError::VendorNotApproved(owner.status));
        }

        let product = match self.products.lock_product(&mut tx, promotion.product).await {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => return Err(PromotionsServiceError::InvalidReference),
            Err(error) => return Err(error.into()),
        };

        ensure_owner(Actor::Vendor(vendor), product.vendor)?;

        self.repository
            .create_promotion(&mut tx, uuid, vendor, starts_at, &promotion)
            .await?;

        self.repository
            .sync_product_promotions(&mut tx, &[promotion.product])
            .await?;

        let created = self.repository.get_promotion(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(
            promotion = %uuid,
            product = %promotion.product,
            kind = promotion.kind.as_str(),
            "created promotion"
        );

        Ok(created)
    }

    async fn list_vendor_promotions(
        &self,
        vendor: VendorUuid,
        page: PageRequest,
    ) -> Result<Page<PromotionRecord>, PromotionsServiceError> {
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let (promotions, total) = self
            .repository
            .list_promotions(&mut tx, None, Some(vendor), page)
            .await?;

        tx.commit().await?;

        let promotions = promotions
            .into_iter()
            .map(|mut promotion| {
                promotion.status = promotion.effective_status(now);
                promotion
            })
            .collect();

        Ok(Page::new(promotions, page, total))
    }

    async fn cancel_promotion(
        &self,
        vendor: VendorUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let locked = self.repository.lock_promotion(&mut tx, promotion).await?;

        ensure_owner(Actor::Vendor(vendor), locked.vendor)?;

        if locked.status != PromotionStatus::Active || locked.ends_at <= now {
            let status = match locked.status {
                PromotionStatus::Active => PromotionStatus::Expired,
                status => status,
            };

            return Err(PromotionsServiceError::NotActive(status));
        }

        self.repository
            .update_status(&mut tx, promotion, PromotionStatus::Cancelled)
            .await?;

        self.repository
            .sync_product_promotions(&mut tx, &[locked.product])
            .await?;

        let cancelled = self.repository.get_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        info!(promotion = %promotion, "cancelled promotion");

        Ok(cancelled)
    }

    async fn expire_promotions(&self, now: Timestamp) -> Result<u64, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut products = self.repository.expire_promotions(&mut tx, now).await?;

        let expired = products.len() as u64;

        products.sort_unstable();
        products.dedup();

        self.repository
            .sync_product_promotions(&mut tx, &products)
            .await?;

        tx.commit().await?;

        if expired > 0 {
            info!(expired, products = products.len(), "expired promotions");
        }

        Ok(expired)
    }

    async fn list_promotions(
        &self,
        filter: PromotionsFilter,
    ) -> Result<Page<PromotionRecord>, PromotionsServiceError> {
        self.expire_promotions(Timestamp::now()).await?;

        let mut tx = self.db.begin().await?;

        let (promotions, total) = self
            .repository
            .list_promotions(&mut tx, filter.status, None, filter.page)
            .await?;

        tx.commit().await?;

        Ok(Page::new(promotions, filter.page, total))
    }

    async fn update_payment_status(
        &self,
        promotion: PromotionUuid,
        status: PaymentStatus,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .repository
            .update_payment_status(&mut tx, promotion, status)
            .await?
            == 0
        {
            return Err(PromotionsServiceError::NotFound);
        }

        let updated = self.repository.get_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        info!(promotion = %promotion, payment_status = status.as_str(), "updated payment status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Buy a promotion for one of the vendor's products.
    async fn create_promotion(
        &self,
        vendor: VendorUuid,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// The vendor's promotions, newest first. Overdue promotions read as expired.
    async fn list_vendor_promotions(
        &self,
        vendor: VendorUuid,
        page: PageRequest,
    ) -> Result<Page<PromotionRecord>, PromotionsServiceError>;

    /// Cancel a running promotion owned by the vendor.
    async fn cancel_promotion(
        &self,
        vendor: VendorUuid,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Expire every active promotion that ended at or before `now`.
    ///
    /// Returns the number of promotions expired.
    async fn expire_promotions(&self, now: Timestamp) -> Result<u64, PromotionsServiceError>;

    /// All promotions, optionally by status, after an expiry sweep.
    async fn list_promotions(
        &self,
        filter: PromotionsFilter,
    ) -> Result<Page<PromotionRecord>, PromotionsServiceError>;

    async fn update_payment_status(
        &self,
        promotion: PromotionUuid,
        status: PaymentStatus,
    ) -> Result<PromotionRecord, PromotionsServiceError>;
}
