//! Products Repository

use std::collections::BTreeMap;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        categories::records::{CategorySummary, CategoryUuid},
        pagination::{PageRequest, count_from_sql},
        products::{
            data::ProductQuery,
            records::{Availability, ProductRecord, ProductUuid, Tags},
        },
        rows::{to_sql_i64, try_get_u64},
        users::records::UserUuid,
        vendors::{
            records::{VendorSummary, VendorUuid},
            repository::escape_like,
        },
    },
    uploads::StoredImage,
};

const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_SAVED_PRODUCTS_SQL: &str = include_str!("sql/list_saved_products.sql");
const COUNT_SAVED_PRODUCTS_SQL: &str = include_str!("sql/count_saved_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const UPDATE_IMAGES_SQL: &str = include_str!("sql/update_images.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const RECORD_VIEW_SQL: &str = include_str!("sql/record_view.sql");
const RECORD_CLICK_SQL: &str = include_str!("sql/record_click.sql");
const TOGGLE_ACTIVE_SQL: &str = include_str!("sql/toggle_active.sql");
const INSERT_SAVED_PRODUCT_SQL: &str = include_str!("sql/insert_saved_product.sql");
const DELETE_SAVED_PRODUCT_SQL: &str = include_str!("sql/delete_saved_product.sql");
const ADJUST_SAVES_SQL: &str = include_str!("sql/adjust_saves.sql");

/// Column values written by create and update.
#[derive(Debug)]
pub(crate) struct ProductRow<'a> {
    pub uuid: ProductUuid,
    pub category: CategoryUuid,
    pub name: &'a str,
    pub description: &'a str,
    pub price: u64,
    pub stock: u64,
    pub availability: Availability,
    pub tags: &'a [String],
    pub specifications: &'a BTreeMap<String, String>,
}

/// Owner and images of a row-locked product.
#[derive(Debug)]
pub(crate) struct LockedProduct {
    pub vendor: VendorUuid,
    pub images: Vec<StoredImage>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "products.repository.search_products",
        skip(self, tx, query),
        fields(
            sort = query.sort.as_str(),
            page = query.page.page(),
            limit = query.page.limit(),
            has_search = query.search.is_some(),
            total = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &ProductQuery,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let vendor = query.vendor.map(VendorUuid::into_uuid);
        let category = query.category.map(CategoryUuid::into_uuid);
        let min_price = query
            .min_price
            .map(|price| to_sql_i64("min_price", price))
            .transpose()?;
        let max_price = query
            .max_price
            .map(|price| to_sql_i64("max_price", price))
            .transpose()?;
        let city = query
            .city
            .as_deref()
            .map(escape_like)
            .filter(|city| !city.is_empty());
        let availability = query.availability.map(Availability::as_str);
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());

        let products = query_as::<Postgres, ProductRecord>(SEARCH_PRODUCTS_SQL)
            .bind(query.is_active)
            .bind(vendor)
            .bind(category)
            .bind(min_price)
            .bind(max_price)
            .bind(city.as_deref())
            .bind(availability)
            .bind(query.promoted_only)
            .bind(search)
            .bind(query.approved_vendors_only)
            .bind(query.sort.as_str())
            .bind(query.page.sql_limit())
            .bind(query.page.sql_offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(query.is_active)
            .bind(vendor)
            .bind(category)
            .bind(min_price)
            .bind(max_price)
            .bind(city.as_deref())
            .bind(availability)
            .bind(query.promoted_only)
            .bind(search)
            .bind(query.approved_vendors_only)
            .fetch_one(&mut **tx)
            .await?;

        tracing::Span::current().record("total", total);

        debug!(returned = products.len(), total, "searched products");

        Ok((products, count_from_sql(total)))
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_saved_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let products = query_as::<Postgres, ProductRecord>(LIST_SAVED_PRODUCTS_SQL)
            .bind(user.into_uuid())
            .bind(page.sql_limit())
            .bind(page.sql_offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_SAVED_PRODUCTS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok((products, count_from_sql(total)))
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: VendorUuid,
        row: &ProductRow<'_>,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PRODUCT_SQL)
            .bind(row.uuid.into_uuid())
            .bind(vendor.into_uuid())
            .bind(row.category.into_uuid())
            .bind(row.name)
            .bind(row.description)
            .bind(to_sql_i64("price", row.price)?)
            .bind(to_sql_i64("stock", row.stock)?)
            .bind(row.availability.as_str())
            .bind(row.tags)
            .bind(Json(row.specifications))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: &ProductRow<'_>,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_PRODUCT_SQL)
            .bind(row.uuid.into_uuid())
            .bind(row.category.into_uuid())
            .bind(row.name)
            .bind(row.description)
            .bind(to_sql_i64("price", row.price)?)
            .bind(to_sql_i64("stock", row.stock)?)
            .bind(row.availability.as_str())
            .bind(row.tags)
            .bind(Json(row.specifications))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        images: &[StoredImage],
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_IMAGES_SQL)
            .bind(product.into_uuid())
            .bind(Json(images))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Lock a product row for the rest of the transaction.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<LockedProduct, sqlx::Error> {
        let (vendor, Json(images)): (Uuid, Json<Vec<StoredImage>>) = query_as(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(LockedProduct {
            vendor: VendorUuid::from_uuid(vendor),
            images,
        })
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn record_view(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(RECORD_VIEW_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Count a click on an active product, returning its vendor.
    pub(crate) async fn record_click(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<VendorUuid, sqlx::Error> {
        let vendor: Uuid = query_scalar(RECORD_CLICK_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(VendorUuid::from_uuid(vendor))
    }

    pub(crate) async fn toggle_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(TOGGLE_ACTIVE_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Returns `true` when the bookmark did not exist before.
    pub(crate) async fn insert_saved_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(INSERT_SAVED_PRODUCT_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Returns `true` when a bookmark was removed.
    pub(crate) async fn delete_saved_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DELETE_SAVED_PRODUCT_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Add `delta` to the save counter, never going below zero.
    pub(crate) async fn adjust_saves(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        delta: i64,
    ) -> Result<u64, sqlx::Error> {
        let saves: i64 = query_scalar(ADJUST_SAVES_SQL)
            .bind(product.into_uuid())
            .bind(delta)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_from_sql(saves))
    }
}

fn decode_availability(value: &str) -> Result<Availability, sqlx::Error> {
    value.parse::<Availability>().map_err(|e| sqlx::Error::ColumnDecode {
        index: "availability".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(images): Json<Vec<StoredImage>> = row.try_get("images")?;
        let Json(specifications): Json<BTreeMap<String, String>> =
            row.try_get("specifications")?;
        let tags: Vec<String> = row.try_get("tags")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            vendor: VendorSummary {
                uuid: VendorUuid::from_uuid(row.try_get("vendor_uuid")?),
                business_name: row.try_get("vendor_business_name")?,
                city: row.try_get("vendor_city")?,
                country: row.try_get("vendor_country")?,
                logo_url: row.try_get("vendor_logo_url")?,
                phone: row.try_get("vendor_phone")?,
                whatsapp: row.try_get("vendor_whatsapp")?,
            },
            category: CategorySummary {
                uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
                name: row.try_get("category_name")?,
                slug: row.try_get("category_slug")?,
            },
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_u64(row, "price")?,
            stock: try_get_u64(row, "stock")?,
            images,
            availability: decode_availability(row.try_get("availability")?)?,
            is_promoted: row.try_get("is_promoted")?,
            promotion_expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("promotion_expires_at")?
                .map(SqlxTimestamp::to_jiff),
            views: try_get_u64(row, "views")?,
            clicks: try_get_u64(row, "clicks")?,
            saves: try_get_u64(row, "saves")?,
            tags: Tags::from_vec(tags),
            specifications,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
