//! Categories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
};
use uuid::Uuid;

use crate::{
    domain::{
        categories::{
            data::CategoryIdentifier,
            records::{CategoryRecord, CategorySummary, CategoryUuid},
        },
        pagination::count_from_sql,
        rows::try_get_u64,
    },
    uploads::StoredImage,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const UPDATE_IMAGE_SQL: &str = include_str!("sql/update_image.sql");
const COUNT_CATEGORY_PRODUCTS_SQL: &str = include_str!("sql/count_category_products.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const SEED_CATEGORY_SQL: &str = include_str!("sql/seed_category.sql");

/// Column values written by create and update.
#[derive(Debug)]
pub(crate) struct CategoryRow<'a> {
    pub uuid: CategoryUuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub parent: Option<CategoryUuid>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        is_active: Option<bool>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .bind(is_active)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        identifier: &CategoryIdentifier,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let (uuid, slug): (Option<Uuid>, Option<&str>) = match identifier {
            CategoryIdentifier::Uuid(uuid) => (Some(uuid.into_uuid()), None),
            CategoryIdentifier::Slug(slug) => (None, Some(slug.as_str())),
        };

        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(uuid)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: &CategoryRow<'_>,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CATEGORY_SQL)
            .bind(row.uuid.into_uuid())
            .bind(row.name)
            .bind(row.slug)
            .bind(row.description)
            .bind(row.icon)
            .bind(row.parent.map(CategoryUuid::into_uuid))
            .bind(row.is_active)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        row: &CategoryRow<'_>,
    ) -> Result<(), sqlx::Error> {
        let rows_affected = query(UPDATE_CATEGORY_SQL)
            .bind(row.uuid.into_uuid())
            .bind(row.name)
            .bind(row.slug)
            .bind(row.description)
            .bind(row.icon)
            .bind(row.parent.map(CategoryUuid::into_uuid))
            .bind(row.is_active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    pub(crate) async fn update_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        image: &StoredImage,
    ) -> Result<(), sqlx::Error> {
        let rows_affected = query(UPDATE_IMAGE_SQL)
            .bind(category.into_uuid())
            .bind(&image.url)
            .bind(&image.filename)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }

    /// Count every product in the category, active or not.
    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_CATEGORY_PRODUCTS_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count_from_sql(count))
    }

    /// Delete a category, returning its image so the file can be removed.
    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Option<StoredImage>, sqlx::Error> {
        let (url, filename): (Option<String>, Option<String>) = query_as(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(url.zip(filename).map(|(url, filename)| StoredImage { url, filename }))
    }

    /// Insert a category unless its name or slug is already taken.
    pub(crate) async fn seed_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        slug: &str,
        description: &str,
        icon: &str,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(SEED_CATEGORY_SQL)
            .bind(CategoryUuid::new().into_uuid())
            .bind(name)
            .bind(slug)
            .bind(description)
            .bind(icon)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let image_url: Option<String> = row.try_get("image_url")?;
        let image_filename: Option<String> = row.try_get("image_filename")?;
        let parent_uuid: Option<Uuid> = row.try_get("parent_uuid")?;

        let parent = match parent_uuid {
            Some(uuid) => Some(CategorySummary {
                uuid: CategoryUuid::from_uuid(uuid),
                name: row.try_get("parent_name")?,
                slug: row.try_get("parent_slug")?,
            }),
            None => None,
        };

        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            icon: row.try_get("icon")?,
            image: image_url
                .zip(image_filename)
                .map(|(url, filename)| StoredImage { url, filename }),
            parent,
            is_active: row.try_get("is_active")?,
            product_count: try_get_u64(row, "product_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
