//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::ensure_owner,
    database::Db,
    domain::{
        pagination::{Page, PageRequest},
        products::{
            data::{
                Actor, NewProduct, ProductQuery, ProductUpdate, SaveToggle, normalize_specifications,
                normalize_tags,
            },
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::{PgProductsRepository, ProductRow},
        },
        users::records::UserUuid,
        validation::{amount, required_text},
        vendors::{
            records::{VendorStatus, VendorUuid},
            repository::PgVendorsRepository,
        },
    },
    uploads::{self, ImageFolder, ImageStore, ImageUpload, StoredImage, validate_product_images},
};

const MAX_NAME_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 2000;

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    vendors: PgVendorsRepository,
    images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for PgProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgProductsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, images: Arc<dyn ImageStore>) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            vendors: PgVendorsRepository::new(),
            images,
        }
    }

    /// Point the product at freshly stored images and commit.
    async fn attach_images(
        &self,
        mut tx: Transaction<'static, Postgres>,
        product: ProductUuid,
        stored: &[StoredImage],
    ) -> Result<ProductRecord, sqlx::Error> {
        self.repository.update_images(&mut tx, product, stored).await?;

        let updated = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn search_products(
        &self,
        query: ProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        if let Some(min) = query.min_price {
            amount("Minimum price", min)?;
        }

        if let Some(max) = query.max_price {
            amount("Maximum price", max)?;
        }

        if let (Some(min), Some(max)) = (query.min_price, query.max_price)
            && min > max
        {
            return Ok(Page::new(Vec::new(), query.page, 0));
        }

        let mut tx = self.db.begin().await?;

        let (products, total) = self.repository.search_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(Page::new(products, query.page, total))
    }

    async fn get_product(
        &self,
        product: ProductUuid,
        actor: Actor,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_product(&mut tx, product).await?;

        if !actor.can_manage(record.vendor.uuid) {
            let vendor = self.vendors.get_vendor(&mut tx, record.vendor.uuid).await?;

            if !record.is_active || !vendor.is_approved() {
                return Err(ProductsServiceError::NotFound);
            }
        }

        self.repository.record_view(&mut tx, product).await?;

        tx.commit().await?;

        record.views += 1;

        Ok(record)
    }

    async fn create_product(
        &self,
        vendor: VendorUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let name = required_text("Product name", &product.name, MAX_NAME_CHARS)?;
        let description =
            required_text("Description", &product.description, MAX_DESCRIPTION_CHARS)?;
        let tags = normalize_tags(&product.tags)?;
        let specifications = normalize_specifications(product.specifications)?;
        let price = amount("Price", product.price)?;
        let stock = amount("Stock", product.stock)?;
        let uuid = ProductUuid::new();

        let mut tx = self.db.begin().await?;

        let owner = self.vendors.get_vendor(&mut tx, vendor).await?;

        if owner.status != VendorStatus::Approved {
            return Err(ProductsServiceError::VendorNotApproved(owner.status));
        }

        self.repository
            .create_product(
                &mut tx,
                vendor,
                &ProductRow {
                    uuid,
                    category: product.category,
                    name: &name,
                    description: &description,
                    price,
                    stock,
                    availability: product.availability,
                    tags: &tags,
                    specifications: &specifications,
                },
            )
            .await?;

        self.vendors.adjust_product_count(&mut tx, vendor, 1).await?;

        let created = self.repository.get_product(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(product = %uuid, vendor = %vendor, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        vendor: VendorUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let price = update.price.map(|price| amount("Price", price)).transpose()?;
        let stock = update.stock.map(|stock| amount("Stock", stock)).transpose()?;

        let mut tx = self.db.begin().await?;

        let locked = self.repository.lock_product(&mut tx, product).await?;

        ensure_owner(Actor::Vendor(vendor), locked.vendor)?;

        let current = self.repository.get_product(&mut tx, product).await?;

        let name = match update.name {
            Some(name) => required_text("Product name", &name, MAX_NAME_CHARS)?,
            None => current.name,
        };
        let description = match update.description {
            Some(description) => {
                required_text("Description", &description, MAX_DESCRIPTION_CHARS)?
            }
            None => current.description,
        };
        let tags = match update.tags {
            Some(tags) => normalize_tags(&tags)?,
            None => current.tags,
        };
        let specifications = match update.specifications {
            Some(specifications) => normalize_specifications(specifications)?,
            None => current.specifications,
        };

        self.repository
            .update_product(
                &mut tx,
                &ProductRow {
                    uuid: product,
                    category: update.category.unwrap_or(current.category.uuid),
                    name: &name,
                    description: &description,
                    price: price.unwrap_or(current.price),
                    stock: stock.unwrap_or(current.stock),
                    availability: update.availability.unwrap_or(current.availability),
                    tags: &tags,
                    specifications: &specifications,
                },
            )
            .await?;

        let updated = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.repository.lock_product(&mut tx, product).await?;

        ensure_owner(actor, locked.vendor)?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        self.vendors
            .adjust_product_count(&mut tx, locked.vendor, -1)
            .await?;

        tx.commit().await?;

        uploads::discard(self.images.as_ref(), ImageFolder::Products, &locked.images).await;

        info!(product = %product, vendor = %locked.vendor, "deleted product");

        Ok(())
    }

    async fn replace_images(
        &self,
        vendor: VendorUuid,
        product: ProductUuid,
        images: Vec<ImageUpload>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        validate_product_images(&images)?;

        let mut tx = self.db.begin().await?;

        let locked = self.repository.lock_product(&mut tx, product).await?;

        ensure_owner(Actor::Vendor(vendor), locked.vendor)?;

        let stored = uploads::store_all(self.images.as_ref(), ImageFolder::Products, &images).await?;

        let updated = match self.attach_images(tx, product, &stored).await {
            Ok(updated) => updated,
            Err(error) => {
                uploads::discard(self.images.as_ref(), ImageFolder::Products, &stored).await;

                return Err(error.into());
            }
        };

        uploads::discard(self.images.as_ref(), ImageFolder::Products, &locked.images).await;

        Ok(updated)
    }

    async fn list_vendor_products(
        &self,
        vendor: VendorUuid,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        self.search_products(ProductQuery {
            vendor: Some(vendor),
            page,
            ..ProductQuery::default()
        })
        .await
    }

    async fn track_click(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let vendor = self.repository.record_click(&mut tx, product).await?;

        self.vendors.record_click(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn toggle_saved(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<SaveToggle, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_product(&mut tx, product).await?;

        let removed = self
            .repository
            .delete_saved_product(&mut tx, user, product)
            .await?;

        let toggle = if removed {
            let saves = self.repository.adjust_saves(&mut tx, product, -1).await?;

            SaveToggle {
                is_saved: false,
                saves,
            }
        } else {
            if !record.is_active {
                return Err(ProductsServiceError::NotFound);
            }

            self.repository
                .insert_saved_product(&mut tx, user, product)
                .await?;

            let saves = self.repository.adjust_saves(&mut tx, product, 1).await?;

            SaveToggle {
                is_saved: true,
                saves,
            }
        };

        tx.commit().await?;

        Ok(toggle)
    }

    async fn list_saved(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self
            .repository
            .list_saved_products(&mut tx, user, page)
            .await?;

        tx.commit().await?;

        Ok(Page::new(products, page, total))
    }

    async fn toggle_active(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.toggle_active(&mut tx, product).await? == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        let updated = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        info!(product = %product, is_active = updated.is_active, "toggled product");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Run a catalog query. An inverted price range matches nothing.
    async fn search_products(
        &self,
        query: ProductQuery,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Product details, counting a view.
    ///
    /// Inactive products and products of unapproved vendors are only visible to their owner
    /// and to admins.
    async fn get_product(
        &self,
        product: ProductUuid,
        actor: Actor,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Create a product for an approved vendor.
    async fn create_product(
        &self,
        vendor: VendorUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Update the vendor's own product.
    async fn update_product(
        &self,
        vendor: VendorUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete a product along with its images.
    async fn delete_product(
        &self,
        actor: Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Replace every image of the vendor's own product.
    async fn replace_images(
        &self,
        vendor: VendorUuid,
        product: ProductUuid,
        images: Vec<ImageUpload>,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// All of a vendor's products, active or not, newest first.
    async fn list_vendor_products(
        &self,
        vendor: VendorUuid,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Count a contact click on the product and its vendor.
    async fn track_click(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Save the product for the user, or unsave it if already saved.
    async fn toggle_saved(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<SaveToggle, ProductsServiceError>;

    /// The user's saved products, most recently saved first.
    async fn list_saved(
        &self,
        user: UserUuid,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Flip a product between active and hidden.
    async fn toggle_active(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::records::CategoryUuid,
            products::{data::ProductSort, records::Availability},
            users::records::Role,
            vendors::VendorsService,
        },
        test::{
            TestContext,
            helpers::{approved_vendor, create_category, create_product, create_user, vendor_profile},
        },
    };

    use super::*;

    fn new_product(category: CategoryUuid) -> NewProduct {
        NewProduct {
            category,
            name: "Desk Lamp".to_string(),
            description: "A warm reading lamp".to_string(),
            price: 2_500,
            stock: 4,
            availability: Availability::Available,
            tags: vec!["lamp".to_string(), "Lamp".to_string()],
            specifications: [("Colour".to_string(), "Brass".to_string())].into(),
        }
    }

    fn png_upload() -> TestResult<(NamedTempFile, ImageUpload)> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"\x89PNG\r\n\x1a\n")?;

        let upload = ImageUpload {
            file_name: Some("lamp.png".to_string()),
            content_type: Some("image/png".to_string()),
            path: file.path().to_path_buf(),
            size: 8,
        };

        Ok((file, upload))
    }

    #[tokio::test]
    async fn create_product_increments_vendor_count() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;

        let product = ctx
            .products
            .create_product(vendor.uuid, new_product(category.uuid))
            .await?;

        assert_eq!(product.vendor.uuid, vendor.uuid);
        assert_eq!(product.category.slug, "electronics");
        assert_eq!(product.tags.as_slice(), ["lamp"]);
        assert!(product.is_active);

        let vendor = ctx.vendors.get_vendor_for_user(user.uuid).await?;
        assert_eq!(vendor.total_products, 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_for_pending_vendor_is_refused() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "shop@example.com", Role::Vendor).await?;
        let vendor = ctx
            .vendors
            .upsert_profile(user.uuid, vendor_profile("Lamps", "Lagos"))
            .await?;
        let category = create_category(&ctx, "Electronics").await?;

        let result = ctx
            .products
            .create_product(vendor.uuid, new_product(category.uuid))
            .await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::VendorNotApproved(VendorStatus::Pending))
            ),
            "expected VendorNotApproved, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_unknown_category_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;

        let result = ctx
            .products
            .create_product(vendor.uuid, new_product(CategoryUuid::new()))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn search_filters_by_price_city_and_text() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, lagos) = approved_vendor(&ctx, "a@example.com", "Lagos Lamps", "Lagos").await?;
        let (_, abuja) = approved_vendor(&ctx, "b@example.com", "Abuja Lamps", "Abuja").await?;
        let category = create_category(&ctx, "Electronics").await?;

        create_product(&ctx, lagos.uuid, category.uuid, "Desk Lamp", 2_500).await?;
        create_product(&ctx, lagos.uuid, category.uuid, "Floor Lamp", 9_000).await?;
        create_product(&ctx, abuja.uuid, category.uuid, "Desk Lamp", 2_000).await?;

        let mut query = ProductQuery::public(PageRequest::first(12));
        query.search = Some("desk".to_string());
        query.city = Some("LAG".to_string());
        query.max_price = Some(5_000);

        let page = ctx.products.search_products(query).await?;

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].vendor.uuid, lagos.uuid);
        assert_eq!(page.items[0].price, 2_500);

        Ok(())
    }

    #[tokio::test]
    async fn search_sorts_by_price_and_paginates() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;

        for (name, price) in [("A", 300), ("B", 100), ("C", 200)] {
            create_product(&ctx, vendor.uuid, category.uuid, name, price).await?;
        }

        let mut query = ProductQuery::public(PageRequest::new(2, 2)?);
        query.sort = ProductSort::PriceAsc;

        let page = ctx.products.search_products(query).await?;

        assert_eq!(page.total, 3);
        assert_eq!(page.pages(), 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].price, 300);

        Ok(())
    }

    #[tokio::test]
    async fn search_with_inverted_price_range_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let mut query = ProductQuery::public(PageRequest::default());
        query.min_price = Some(500);
        query.max_price = Some(100);

        let page = ctx.products.search_products(query).await?;

        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn public_search_hides_blocked_vendors() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        ctx.vendors.set_status(vendor.uuid, VendorStatus::Blocked).await?;

        let page = ctx
            .products
            .search_products(ProductQuery::public(PageRequest::default()))
            .await?;

        assert_eq!(page.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_counts_views() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        ctx.products.get_product(lamp.uuid, Actor::Public).await?;
        let product = ctx.products.get_product(lamp.uuid, Actor::Public).await?;

        assert_eq!(product.views, 2);

        Ok(())
    }

    #[tokio::test]
    async fn inactive_product_is_only_visible_to_owner_and_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        let hidden = ctx.products.toggle_active(lamp.uuid).await?;
        assert!(!hidden.is_active);

        let result = ctx.products.get_product(lamp.uuid, Actor::Public).await;
        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        ctx.products
            .get_product(lamp.uuid, Actor::Vendor(vendor.uuid))
            .await?;
        ctx.products.get_product(lamp.uuid, Actor::Admin).await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_product_keeps_unset_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        let updated = ctx
            .products
            .update_product(
                vendor.uuid,
                lamp.uuid,
                ProductUpdate {
                    price: Some(3_000),
                    availability: Some(Availability::OutOfStock),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Desk Lamp");
        assert_eq!(updated.price, 3_000);
        assert_eq!(updated.availability, Availability::OutOfStock);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_of_another_vendor_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, owner) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let (_, other) = approved_vendor(&ctx, "b@example.com", "Chairs", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, owner.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        let result = ctx
            .products
            .update_product(other.uuid, lamp.uuid, ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_decrements_vendor_count() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        ctx.products
            .delete_product(Actor::Vendor(vendor.uuid), lamp.uuid)
            .await?;

        let vendor = ctx.vendors.get_vendor_for_user(user.uuid).await?;
        assert_eq!(vendor.total_products, 0);

        let result = ctx.products.get_product(lamp.uuid, Actor::Admin).await;
        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .delete_product(Actor::Admin, ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_of_another_vendor_is_forbidden_but_admin_may() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, owner) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let (_, rival) = approved_vendor(&ctx, "b@example.com", "Rival", "Abuja").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, owner.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        let result = ctx
            .products
            .delete_product(Actor::Vendor(rival.uuid), lamp.uuid)
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        ctx.products.delete_product(Actor::Admin, lamp.uuid).await?;

        Ok(())
    }

    #[tokio::test]
    async fn replace_images_stores_new_files() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;
        let (_file, upload) = png_upload()?;

        let updated = ctx
            .products
            .replace_images(vendor.uuid, lamp.uuid, vec![upload])
            .await?;

        assert_eq!(updated.images.len(), 1);
        assert!(updated.images[0].url.starts_with("/uploads/products/"));
        assert!(
            ctx.uploads_root()
                .join("products")
                .join(&updated.images[0].filename)
                .exists()
        );

        Ok(())
    }

    #[tokio::test]
    async fn replace_images_discards_new_files_when_the_update_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;
        let (_file, upload) = png_upload()?;

        sqlx::query(
            "CREATE FUNCTION reject_images() RETURNS trigger AS $$ \
             BEGIN RAISE EXCEPTION 'images are read-only'; END; $$ LANGUAGE plpgsql",
        )
        .execute(ctx.db.pool())
        .await?;
        sqlx::query(
            "CREATE TRIGGER reject_images BEFORE UPDATE OF images ON products \
             FOR EACH ROW EXECUTE FUNCTION reject_images()",
        )
        .execute(ctx.db.pool())
        .await?;

        let result = ctx
            .products
            .replace_images(vendor.uuid, lamp.uuid, vec![upload])
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Sql(_))),
            "expected a storage error, got {result:?}"
        );

        let folder = ctx.uploads_root().join("products");
        let leftovers = match std::fs::read_dir(&folder) {
            Ok(entries) => entries.count(),
            Err(_missing) => 0,
        };

        assert_eq!(leftovers, 0, "stored images should be discarded");

        Ok(())
    }

    #[tokio::test]
    async fn toggle_saved_saves_then_unsaves() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let customer = create_user(&ctx, "buyer@example.com", Role::Customer).await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        let saved = ctx.products.toggle_saved(customer.uuid, lamp.uuid).await?;
        assert_eq!(
            saved,
            SaveToggle {
                is_saved: true,
                saves: 1
            }
        );

        let page = ctx
            .products
            .list_saved(customer.uuid, PageRequest::default())
            .await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].uuid, lamp.uuid);

        let unsaved = ctx.products.toggle_saved(customer.uuid, lamp.uuid).await?;
        assert_eq!(
            unsaved,
            SaveToggle {
                is_saved: false,
                saves: 0
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn track_click_counts_on_product_and_vendor() -> TestResult {
        let ctx = TestContext::new().await;
        let (user, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;

        ctx.products.track_click(lamp.uuid).await?;

        let product = ctx.products.get_product(lamp.uuid, Actor::Admin).await?;
        let vendor = ctx.vendors.get_vendor_for_user(user.uuid).await?;

        assert_eq!(product.clicks, 1);
        assert_eq!(vendor.total_clicks, 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_vendor_products_includes_inactive() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, vendor) = approved_vendor(&ctx, "a@example.com", "Lamps", "Lagos").await?;
        let category = create_category(&ctx, "Electronics").await?;
        let lamp = create_product(&ctx, vendor.uuid, category.uuid, "Desk Lamp", 2_500).await?;
        create_product(&ctx, vendor.uuid, category.uuid, "Floor Lamp", 9_000).await?;

        ctx.products.toggle_active(lamp.uuid).await?;

        let page = ctx
            .products
            .list_vendor_products(vendor.uuid, PageRequest::default())
            .await?;

        assert_eq!(page.total, 2);

        Ok(())
    }
}
