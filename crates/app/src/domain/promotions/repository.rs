//! Promotions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};
use uuid::Uuid;

use crate::domain::{
    pagination::{PageRequest, count_from_sql},
    products::records::ProductUuid,
    promotions::{
        data::NewPromotion,
        records::{
            PaymentStatus, PromotedProduct, PromotingVendor, PromotionRecord, PromotionStatus,
            PromotionUuid,
        },
    },
    rows::{to_sql_i64, try_get_u64},
    vendors::records::VendorUuid,
};

const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const COUNT_PROMOTIONS_SQL: &str = include_str!("sql/count_promotions.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const LOCK_PROMOTION_SQL: &str = include_str!("sql/lock_promotion.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("sql/update_payment_status.sql");
const EXPIRE_PROMOTIONS_SQL: &str = include_str!("sql/expire_promotions.sql");
const SYNC_PRODUCT_PROMOTIONS_SQL: &str = include_str!("sql/sync_product_promotions.sql");

/// Ownership and state of a row-locked promotion.
#[derive(Debug)]
pub(crate) struct LockedPromotion {
    pub vendor: VendorUuid,
    pub product: ProductUuid,
    pub status: PromotionStatus,
    pub ends_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<PromotionRecord, sqlx::Error> {
        query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "promotions.repository.list_promotions",
        skip(self, tx),
        fields(total = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: Option<PromotionStatus>,
        vendor: Option<VendorUuid>,
        page: PageRequest,
    ) -> Result<(Vec<PromotionRecord>, u64), sqlx::Error> {
        let status = status.map(PromotionStatus::as_str);
        let vendor = vendor.map(VendorUuid::into_uuid);

        let promotions = query_as::<Postgres, PromotionRecord>(LIST_PROMOTIONS_SQL)
            .bind(status)
            .bind(vendor)
            .bind(page.sql_limit())
            .bind(page.sql_offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_PROMOTIONS_SQL)
            .bind(status)
            .bind(vendor)
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        Ok((promotions, count_from_sql(total)))
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
        vendor: VendorUuid,
        starts_at: Timestamp,
        promotion: &NewPromotion,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .bind(promotion.product.into_uuid())
            .bind(vendor.into_uuid())
            .bind(promotion.kind.as_str())
            .bind(SqlxTimestamp::from(starts_at))
            .bind(SqlxTimestamp::from(promotion.ends_at))
            .bind(to_sql_i64("price", promotion.price)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn lock_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<LockedPromotion, sqlx::Error> {
        let row = query(LOCK_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(LockedPromotion {
            vendor: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            status: decode(row.try_get("status")?, "status")?,
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
        })
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        status: PromotionStatus,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_STATUS_SQL)
            .bind(promotion.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        status: PaymentStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PAYMENT_STATUS_SQL)
            .bind(promotion.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Mark overdue active promotions expired, returning their products.
    #[tracing::instrument(
        name = "promotions.repository.expire_promotions",
        skip(self, tx),
        fields(expired = tracing::field::Empty),
        err
    )]
    pub(crate) async fn expire_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<Vec<ProductUuid>, sqlx::Error> {
        let products: Vec<Uuid> = query_scalar(EXPIRE_PROMOTIONS_SQL)
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await?;

        tracing::Span::current().record("expired", products.len());

        Ok(products.into_iter().map(ProductUuid::from_uuid).collect())
    }

    /// Recompute each product's promoted flag and expiry from its active promotions.
    pub(crate) async fn sync_product_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = products.iter().map(|product| product.into_uuid()).collect();

        query(SYNC_PRODUCT_PROMOTIONS_SQL)
            .bind(uuids)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn decode<T>(value: &str, column: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            product: PromotedProduct {
                uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                name: row.try_get("product_name")?,
                price: try_get_u64(row, "product_price")?,
            },
            vendor: PromotingVendor {
                uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
                business_name: row.try_get("vendor_business_name")?,
            },
            kind: decode(row.try_get("kind")?, "kind")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            status: decode(row.try_get("status")?, "status")?,
            price: try_get_u64(row, "price")?,
            payment_status: decode(row.try_get("payment_status")?, "payment_status")?,
            impressions: try_get_u64(row, "impressions")?,
            clicks: try_get_u64(row, "clicks")?,
            conversions: try_get_u64(row, "conversions")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
