//! Categories service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{
                CategoryDetails, CategoryIdentifier, CategoryUpdate, DEFAULT_CATEGORIES,
                NewCategory,
            },
            errors::CategoriesServiceError,
            records::{CategoryRecord, CategoryUuid},
            repository::{CategoryRow, PgCategoriesRepository},
            slugify,
        },
        pagination::PageRequest,
        products::{data::ProductQuery, repository::PgProductsRepository},
        validation::{ValidationError, optional_text, required_text},
    },
    uploads::{self, ImageFolder, ImageStore, ImageUpload, StoredImage},
};

/// Products shown on a category page.
pub const CATEGORY_PRODUCT_LIMIT: u32 = 20;

#[derive(Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
    products: PgProductsRepository,
    images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for PgCategoriesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCategoriesService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db, images: Arc<dyn ImageStore>) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
            products: PgProductsRepository::new(),
            images,
        }
    }

    async fn attach_image(
        &self,
        mut tx: Transaction<'static, Postgres>,
        category: CategoryUuid,
        image: &StoredImage,
    ) -> Result<CategoryRecord, sqlx::Error> {
        self.repository.update_image(&mut tx, category, image).await?;

        let updated = self
            .repository
            .get_category(&mut tx, &CategoryIdentifier::Uuid(category))
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

fn validated_name(name: &str) -> Result<(String, String), ValidationError> {
    let name = required_text("Category name", name, 100)?;
    let slug = slugify(&name);

    if slug.is_empty() {
        return Err(ValidationError::new(
            "Category name must contain letters or digits",
        ));
    }

    Ok((name, slug))
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(
        &self,
        active_only: bool,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self
            .repository
            .list_categories(&mut tx, active_only.then_some(true))
            .await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        identifier: CategoryIdentifier,
    ) -> Result<CategoryDetails, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, &identifier).await?;

        let (products, _) = self
            .products
            .search_products(
                &mut tx,
                &ProductQuery {
                    category: Some(category.uuid),
                    is_active: Some(true),
                    page: PageRequest::first(CATEGORY_PRODUCT_LIMIT),
                    ..ProductQuery::default()
                },
            )
            .await?;

        tx.commit().await?;

        Ok(CategoryDetails { category, products })
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let (name, slug) = validated_name(&category.name)?;
        let description = optional_text("Description", category.description.as_deref(), 500)?;
        let icon = optional_text("Icon", category.icon.as_deref(), 50)?;
        let uuid = CategoryUuid::new();

        let mut tx = self.db.begin().await?;

        self.repository
            .create_category(
                &mut tx,
                &CategoryRow {
                    uuid,
                    name: &name,
                    slug: &slug,
                    description: description.as_deref(),
                    icon: icon.as_deref(),
                    parent: category.parent,
                    is_active: category.is_active,
                },
            )
            .await?;

        let created = self
            .repository
            .get_category(&mut tx, &CategoryIdentifier::Uuid(uuid))
            .await?;

        tx.commit().await?;

        info!(category = %uuid, slug = %slug, "created category");

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let identifier = CategoryIdentifier::Uuid(category);
        let current = self.repository.get_category(&mut tx, &identifier).await?;

        let (name, slug) = match update.name {
            Some(name) => validated_name(&name)?,
            None => (current.name, current.slug),
        };

        let description = match update.description {
            Some(description) => optional_text("Description", Some(&description), 500)?,
            None => current.description,
        };

        let icon = match update.icon {
            Some(icon) => optional_text("Icon", Some(&icon), 50)?,
            None => current.icon,
        };

        let parent = update
            .parent
            .unwrap_or_else(|| current.parent.map(|parent| parent.uuid));

        if parent == Some(category) {
            return Err(ValidationError::new("A category cannot be its own parent").into());
        }

        self.repository
            .update_category(
                &mut tx,
                &CategoryRow {
                    uuid: category,
                    name: &name,
                    slug: &slug,
                    description: description.as_deref(),
                    icon: icon.as_deref(),
                    parent,
                    is_active: update.is_active.unwrap_or(current.is_active),
                },
            )
            .await?;

        let updated = self.repository.get_category(&mut tx, &identifier).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let product_count = self.repository.count_products(&mut tx, category).await?;

        if product_count > 0 {
            return Err(CategoriesServiceError::HasProducts(product_count));
        }

        let image = self.repository.delete_category(&mut tx, category).await?;

        tx.commit().await?;

        if let Some(image) = image {
            uploads::discard(self.images.as_ref(), ImageFolder::Categories, &[image]).await;
        }

        info!(category = %category, "deleted category");

        Ok(())
    }

    async fn replace_image(
        &self,
        category: CategoryUuid,
        upload: ImageUpload,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_category(&mut tx, &CategoryIdentifier::Uuid(category))
            .await?;

        let image = self.images.store(ImageFolder::Categories, &upload).await?;

        let updated = match self.attach_image(tx, category, &image).await {
            Ok(updated) => updated,
            Err(error) => {
                uploads::discard(self.images.as_ref(), ImageFolder::Categories, &[image]).await;

                return Err(error.into());
            }
        };

        if let Some(previous) = current.image {
            uploads::discard(self.images.as_ref(), ImageFolder::Categories, &[previous]).await;
        }

        Ok(updated)
    }

    async fn seed_defaults(&self) -> Result<u64, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;
        let mut inserted = 0;

        for (name, description, icon) in DEFAULT_CATEGORIES {
            if self
                .repository
                .seed_category(&mut tx, name, &slugify(name), description, icon)
                .await?
            {
                inserted += 1;
            }
        }

        tx.commit().await?;

        Ok(inserted)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// List categories sorted by name, optionally only the active ones.
    async fn list_categories(
        &self,
        active_only: bool,
    ) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a category by UUID or slug along with its newest active products.
    async fn get_category(
        &self,
        identifier: CategoryIdentifier,
    ) -> Result<CategoryDetails, CategoriesServiceError>;

    /// Creates a category, deriving its slug from the name.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Updates a category. Renaming recomputes the slug.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category that no product references.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;

    /// Store a new category image and remove the previous one.
    async fn replace_image(
        &self,
        category: CategoryUuid,
        upload: ImageUpload,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Insert the default categories that do not exist yet, returning how many were added.
    async fn seed_defaults(&self) -> Result<u64, CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{approved_vendor, create_category, create_product},
    };

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
            icon: None,
            parent: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_category_derives_slug() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(new_category("Home & Living"))
            .await?;

        assert_eq!(category.slug, "home-living");
        assert_eq!(category.product_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.categories
            .create_category(new_category("Fashion"))
            .await?;

        let result = ctx.categories.create_category(new_category("Fashion")).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_unknown_parent_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .create_category(NewCategory {
                parent: Some(CategoryUuid::new()),
                ..new_category("Phones")
            })
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_category_by_slug_includes_parent_and_products() -> TestResult {
        let ctx = TestContext::new().await;
        let parent = create_category(&ctx, "Electronics").await?;
        let child = ctx
            .categories
            .create_category(NewCategory {
                parent: Some(parent.uuid),
                ..new_category("Mobile Phones")
            })
            .await?;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Phones", "Lagos").await?;

        create_product(&ctx, vendor.uuid, child.uuid, "Phone X", 100_000).await?;

        let details = ctx
            .categories
            .get_category(CategoryIdentifier::from("mobile-phones"))
            .await?;

        assert_eq!(details.category.uuid, child.uuid);
        assert_eq!(
            details.category.parent.map(|p| p.slug).as_deref(),
            Some("electronics")
        );
        assert_eq!(details.category.product_count, 1);
        assert_eq!(details.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_sorts_by_name_and_filters_active() -> TestResult {
        let ctx = TestContext::new().await;

        create_category(&ctx, "Fashion").await?;
        create_category(&ctx, "Automotive").await?;
        ctx.categories
            .create_category(NewCategory {
                is_active: false,
                ..new_category("Beauty")
            })
            .await?;

        let all = ctx.categories.list_categories(false).await?;
        let active = ctx.categories.list_categories(true).await?;

        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Automotive", "Beauty", "Fashion"]);
        assert_eq!(active.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_category_recomputes_slug_on_rename() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Sports").await?;

        let updated = ctx
            .categories
            .update_category(
                category.uuid,
                CategoryUpdate {
                    name: Some("Sports & Outdoors".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.slug, "sports-outdoors");

        Ok(())
    }

    #[tokio::test]
    async fn update_category_rejects_self_parent() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Sports").await?;

        let result = ctx
            .categories
            .update_category(
                category.uuid,
                CategoryUpdate {
                    parent: Some(Some(category.uuid)),
                    ..CategoryUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_with_products_is_refused() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Electronics").await?;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Phones", "Lagos").await?;

        create_product(&ctx, vendor.uuid, category.uuid, "Phone X", 100_000).await?;

        let result = ctx.categories.delete_category(category.uuid).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::HasProducts(1))),
            "expected HasProducts(1), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_empty_category_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Electronics").await?;

        ctx.categories.delete_category(category.uuid).await?;

        let result = ctx
            .categories
            .get_category(CategoryIdentifier::Uuid(category.uuid))
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn seed_defaults_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.categories.seed_defaults().await?, 6);
        assert_eq!(ctx.categories.seed_defaults().await?, 0);

        let slugs: Vec<_> = ctx
            .categories
            .list_categories(true)
            .await?
            .into_iter()
            .map(|c| c.slug)
            .collect();

        assert!(slugs.contains(&"home-living".to_string()));

        Ok(())
    }
}
