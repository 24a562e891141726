//! Vendors Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};

use crate::{
    domain::{
        pagination::count_from_sql,
        rows::try_get_u64,
        users::records::UserUuid,
        vendors::{
            data::{ProductTotals, VendorProfile, VendorWithOwner, VendorsFilter},
            records::{
                ContactInfo, Location, Rating, VendorOwner, VendorRecord, VendorStatus, VendorUuid,
            },
        },
    },
    uploads::StoredImage,
};

const UPSERT_VENDOR_SQL: &str = include_str!("sql/upsert_vendor.sql");
const GET_VENDOR_SQL: &str = include_str!("sql/get_vendor.sql");
const GET_VENDOR_BY_USER_SQL: &str = include_str!("sql/get_vendor_by_user.sql");
const RECORD_PROFILE_VIEW_SQL: &str = include_str!("sql/record_profile_view.sql");
const UPDATE_LOGO_SQL: &str = include_str!("sql/update_logo.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const LIST_VENDORS_SQL: &str = include_str!("sql/list_vendors.sql");
const COUNT_VENDORS_SQL: &str = include_str!("sql/count_vendors.sql");
const LIST_VENDORS_WITH_OWNERS_SQL: &str = include_str!("sql/list_vendors_with_owners.sql");
const PRODUCT_TOTALS_SQL: &str = include_str!("sql/product_totals.sql");
const ADJUST_PRODUCT_COUNT_SQL: &str = include_str!("sql/adjust_product_count.sql");
const RECORD_CLICK_SQL: &str = include_str!("sql/record_click.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVendorsRepository;

impl PgVendorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn upsert_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        profile: &VendorProfile,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPSERT_VENDOR_SQL)
            .bind(VendorUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(&profile.business_name)
            .bind(profile.description.as_deref())
            .bind(&profile.location.address)
            .bind(&profile.location.city)
            .bind(profile.location.state.as_deref())
            .bind(&profile.location.country)
            .bind(profile.location.latitude)
            .bind(profile.location.longitude)
            .bind(&profile.contact.phone)
            .bind(profile.contact.whatsapp.as_deref())
            .bind(profile.contact.email.as_deref())
            .bind(profile.contact.website.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_vendor(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(GET_VENDOR_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_vendor_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<VendorRecord>, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(GET_VENDOR_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Count a public profile view. Only approved vendors are visible.
    pub(crate) async fn record_profile_view(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(RECORD_PROFILE_VIEW_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_logo(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        logo: &StoredImage,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPDATE_LOGO_SQL)
            .bind(vendor.into_uuid())
            .bind(&logo.url)
            .bind(&logo.filename)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        status: VendorStatus,
    ) -> Result<VendorRecord, sqlx::Error> {
        query_as::<Postgres, VendorRecord>(UPDATE_STATUS_SQL)
            .bind(vendor.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "vendors.repository.list_vendors",
        skip(self, tx),
        fields(total = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_vendors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &VendorsFilter,
    ) -> Result<(Vec<VendorRecord>, u64), sqlx::Error> {
        let status = filter.status.map(VendorStatus::as_str);
        let city = filter.city.as_deref().map(escape_like);
        let search = filter.search.as_deref();

        let vendors = query_as::<Postgres, VendorRecord>(LIST_VENDORS_SQL)
            .bind(status)
            .bind(city.as_deref())
            .bind(search)
            .bind(filter.page.sql_limit())
            .bind(filter.page.sql_offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_VENDORS_SQL)
            .bind(status)
            .bind(city.as_deref())
            .bind(search)
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        Ok((vendors, count_from_sql(total)))
    }

    #[tracing::instrument(
        name = "vendors.repository.list_vendors_with_owners",
        skip(self, tx),
        fields(total = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_vendors_with_owners(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &VendorsFilter,
    ) -> Result<(Vec<VendorWithOwner>, u64), sqlx::Error> {
        let status = filter.status.map(VendorStatus::as_str);
        let city = filter.city.as_deref().map(escape_like);
        let search = filter.search.as_deref();

        let vendors = query_as::<Postgres, VendorWithOwner>(LIST_VENDORS_WITH_OWNERS_SQL)
            .bind(status)
            .bind(city.as_deref())
            .bind(search)
            .bind(filter.page.sql_limit())
            .bind(filter.page.sql_offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_VENDORS_SQL)
            .bind(status)
            .bind(city.as_deref())
            .bind(search)
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        Ok((vendors, count_from_sql(total)))
    }

    pub(crate) async fn product_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<ProductTotals, sqlx::Error> {
        let row = query(PRODUCT_TOTALS_SQL)
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ProductTotals {
            total: try_get_u64(&row, "total")?,
            active: try_get_u64(&row, "active")?,
            promoted: try_get_u64(&row, "promoted")?,
            views: try_get_u64(&row, "views")?,
            clicks: try_get_u64(&row, "clicks")?,
            saves: try_get_u64(&row, "saves")?,
        })
    }

    /// Add `delta` to the vendor's product count, never going below zero.
    pub(crate) async fn adjust_product_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        delta: i64,
    ) -> Result<(), sqlx::Error> {
        query(ADJUST_PRODUCT_COUNT_SQL)
            .bind(vendor.into_uuid())
            .bind(delta)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn record_click(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
    ) -> Result<(), sqlx::Error> {
        query(RECORD_CLICK_SQL)
            .bind(vendor.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

/// Escape `LIKE` wildcards so user input only ever matches literally.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

fn decode_status(value: &str) -> Result<VendorStatus, sqlx::Error> {
    value.parse::<VendorStatus>().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for VendorRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let logo_url: Option<String> = row.try_get("logo_url")?;
        let logo_filename: Option<String> = row.try_get("logo_filename")?;

        Ok(Self {
            uuid: VendorUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            business_name: row.try_get("business_name")?,
            description: row.try_get("description")?,
            logo: logo_url
                .zip(logo_filename)
                .map(|(url, filename)| StoredImage { url, filename }),
            location: Location {
                address: row.try_get("address")?,
                city: row.try_get("city")?,
                state: row.try_get("state")?,
                country: row.try_get("country")?,
                latitude: row.try_get("latitude")?,
                longitude: row.try_get("longitude")?,
            },
            contact: ContactInfo {
                phone: row.try_get("phone")?,
                whatsapp: row.try_get("whatsapp")?,
                email: row.try_get("contact_email")?,
                website: row.try_get("website")?,
            },
            status: decode_status(row.try_get("status")?)?,
            rating: Rating {
                average: row.try_get("rating_average")?,
                count: try_get_u64(row, "rating_count")?,
            },
            total_products: try_get_u64(row, "total_products")?,
            total_sales: try_get_u64(row, "total_sales")?,
            profile_views: try_get_u64(row, "profile_views")?,
            total_clicks: try_get_u64(row, "total_clicks")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VendorWithOwner {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let vendor = VendorRecord::from_row(row)?;

        Ok(Self {
            owner: VendorOwner {
                uuid: vendor.user_uuid,
                name: row.try_get("owner_name")?,
                email: row.try_get("owner_email")?,
                phone: row.try_get("owner_phone")?,
                is_active: row.try_get("owner_is_active")?,
            },
            vendor,
        })
    }
}
