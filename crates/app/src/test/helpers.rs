//! Test Helpers

use std::collections::BTreeMap;

use jiff::Timestamp;
use smallvec::SmallVec;
use testresult::TestResult;

use crate::{
    auth::hash_password,
    domain::{
        categories::{
            CategoriesService,
            data::NewCategory,
            records::{CategoryRecord, CategorySummary, CategoryUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{Availability, ProductRecord, ProductUuid},
        },
        users::{
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
        vendors::{
            VendorsService,
            data::VendorProfile,
            records::{
                ContactInfo, Location, Rating, VendorRecord, VendorStatus, VendorSummary,
                VendorUuid,
            },
        },
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct-horse";

/// Insert an active user whose password is [`TEST_PASSWORD`].
pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    role: Role,
) -> TestResult<UserRecord> {
    let mut tx = ctx.db.pool().begin().await?;

    let user = PgUsersRepository::new()
        .create_user(
            &mut tx,
            &NewUser {
                uuid: UserUuid::new(),
                name: "Test User".to_string(),
                email: email.to_lowercase(),
                password_hash: hash_password(TEST_PASSWORD)?,
                role,
                phone: None,
            },
        )
        .await?;

    tx.commit().await?;

    Ok(user)
}

pub(crate) fn vendor_profile(business_name: &str, city: &str) -> VendorProfile {
    VendorProfile {
        business_name: business_name.to_string(),
        description: None,
        location: Location {
            address: "1 Market Street".to_string(),
            city: city.to_string(),
            state: None,
            country: "Nigeria".to_string(),
            latitude: None,
            longitude: None,
        },
        contact: ContactInfo {
            phone: "+2348000000000".to_string(),
            whatsapp: None,
            email: None,
            website: None,
        },
    }
}

/// A vendor user with an approved business profile.
pub(crate) async fn approved_vendor(
    ctx: &TestContext,
    email: &str,
    business_name: &str,
    city: &str,
) -> TestResult<(UserRecord, VendorRecord)> {
    let user = create_user(ctx, email, Role::Vendor).await?;

    let vendor = ctx
        .vendors
        .upsert_profile(user.uuid, vendor_profile(business_name, city))
        .await?;

    let vendor = ctx
        .vendors
        .set_status(vendor.uuid, VendorStatus::Approved)
        .await?;

    Ok((user, vendor))
}

pub(crate) async fn create_category(ctx: &TestContext, name: &str) -> TestResult<CategoryRecord> {
    let category = ctx
        .categories
        .create_category(NewCategory {
            name: name.to_string(),
            description: None,
            icon: None,
            parent: None,
            is_active: true,
        })
        .await?;

    Ok(category)
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    vendor: VendorUuid,
    category: CategoryUuid,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(
            vendor,
            NewProduct {
                category,
                name: name.to_string(),
                description: format!("{name} for sale"),
                price,
                stock: 5,
                availability: Availability::Available,
                tags: Vec::new(),
                specifications: BTreeMap::new(),
            },
        )
        .await
}

/// An in-memory vendor record for tests that never touch the database.
pub(crate) fn make_vendor(user: UserUuid, status: VendorStatus) -> VendorRecord {
    let now = Timestamp::now();
    let profile = vendor_profile("Test Vendor", "Lagos");

    VendorRecord {
        uuid: VendorUuid::new(),
        user_uuid: user,
        business_name: profile.business_name,
        description: profile.description,
        logo: None,
        location: profile.location,
        contact: profile.contact,
        status,
        rating: Rating {
            average: 0.0,
            count: 0,
        },
        total_products: 0,
        total_sales: 0,
        profile_views: 0,
        total_clicks: 0,
        created_at: now,
        updated_at: now,
    }
}

/// An in-memory product record for tests that never touch the database.
pub(crate) fn make_product(
    uuid: ProductUuid,
    vendor: VendorUuid,
    category: CategoryUuid,
) -> ProductRecord {
    let now = Timestamp::now();

    ProductRecord {
        uuid,
        vendor: VendorSummary {
            uuid: vendor,
            business_name: "Test Vendor".to_string(),
            city: "Lagos".to_string(),
            country: "Nigeria".to_string(),
            logo_url: None,
            phone: "+2348000000000".to_string(),
            whatsapp: None,
        },
        category: CategorySummary {
            uuid: category,
            name: "Electronics".to_string(),
            slug: "electronics".to_string(),
        },
        name: "Desk Lamp".to_string(),
        description: "A lamp".to_string(),
        price: 2_500,
        stock: 1,
        images: Vec::new(),
        availability: Availability::Available,
        is_promoted: false,
        promotion_expires_at: None,
        views: 0,
        clicks: 0,
        saves: 0,
        tags: SmallVec::new(),
        specifications: BTreeMap::new(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
