//! Test helpers.

use std::{collections::BTreeMap, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use salvo::{affix_state::inject, prelude::*};
use smallvec::SmallVec;
use uuid::Uuid;

use marketplace_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategorySummary, CategoryUuid},
        },
        dashboard::MockDashboardService,
        products::{
            MockProductsService,
            records::{Availability, ProductRecord, ProductUuid},
        },
        promotions::{
            MockPromotionsService,
            records::{
                PaymentStatus, PromotedProduct, PromotingVendor, PromotionKind, PromotionRecord,
                PromotionStatus, PromotionUuid,
            },
        },
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
        vendors::{
            MockVendorsService,
            records::{
                ContactInfo, Location, Rating, VendorRecord, VendorStatus, VendorSummary,
                VendorUuid,
            },
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_VENDOR_UUID: VendorUuid = VendorUuid::from_uuid(Uuid::from_u128(1));

/// One mock per service. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub users: MockUsersService,
    pub vendors: MockVendorsService,
    pub categories: MockCategoriesService,
    pub products: MockProductsService,
    pub promotions: MockPromotionsService,
    pub dashboard: MockDashboardService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            vendors: Arc::new(self.vendors),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            promotions: Arc::new(self.promotions),
            dashboard: Arc::new(self.dashboard),
        })
    }
}

pub(crate) fn test_user(role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: TEST_USER_UUID,
        name: "Ada Obi".to_string(),
        email: "ada@example.com".to_string(),
        role,
    }
}

/// Pretends the request passed authentication, and the vendor gate when a vendor is set.
#[derive(Debug, Clone)]
pub(crate) struct InjectIdentity {
    user: AuthenticatedUser,
    vendor: Option<VendorUuid>,
}

#[handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_user(self.user.clone());

        if let Some(vendor) = self.vendor {
            depot.insert_vendor_uuid(vendor);
        }

        ctrl.call_next(req, depot, res).await;
    }
}

/// A service with no caller identity.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// A service where every request comes from a signed-in user with `role`.
pub(crate) fn user_service(mocks: Mocks, role: Role, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectIdentity {
                user: test_user(role),
                vendor: None,
            })
            .push(route),
    )
}

/// A service where every request comes from the approved vendor [`TEST_VENDOR_UUID`].
pub(crate) fn vendor_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectIdentity {
                user: test_user(Role::Vendor),
                vendor: Some(TEST_VENDOR_UUID),
            })
            .push(route),
    )
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> UserRecord {
    UserRecord {
        uuid,
        name: "Ada Obi".to_string(),
        email: "ada@example.com".to_string(),
        role,
        phone: None,
        is_active: true,
        is_email_verified: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_vendor(uuid: VendorUuid, status: VendorStatus) -> VendorRecord {
    VendorRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        business_name: "Ada's Lamps".to_string(),
        description: None,
        logo: None,
        location: Location {
            address: "1 Market Street".to_string(),
            city: "Lagos".to_string(),
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
        status,
        rating: Rating {
            average: 0.0,
            count: 0,
        },
        total_products: 0,
        total_sales: 0,
        profile_views: 0,
        total_clicks: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(uuid: CategoryUuid) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: "Electronics".to_string(),
        slug: "electronics".to_string(),
        description: None,
        icon: None,
        image: None,
        parent: None,
        is_active: true,
        product_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        vendor: VendorSummary {
            uuid: TEST_VENDOR_UUID,
            business_name: "Ada's Lamps".to_string(),
            city: "Lagos".to_string(),
            country: "Nigeria".to_string(),
            logo_url: None,
            phone: "+2348000000000".to_string(),
            whatsapp: None,
        },
        category: CategorySummary {
            uuid: CategoryUuid::from_uuid(Uuid::from_u128(2)),
            name: "Electronics".to_string(),
            slug: "electronics".to_string(),
        },
        name: "Desk Lamp".to_string(),
        description: "A warm desk lamp".to_string(),
        price: 2_500,
        stock: 3,
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
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_promotion(uuid: PromotionUuid, product: ProductUuid) -> PromotionRecord {
    PromotionRecord {
        uuid,
        product: PromotedProduct {
            uuid: product,
            name: "Desk Lamp".to_string(),
            price: 2_500,
        },
        vendor: PromotingVendor {
            uuid: TEST_VENDOR_UUID,
            business_name: "Ada's Lamps".to_string(),
        },
        kind: PromotionKind::Featured,
        starts_at: Timestamp::UNIX_EPOCH,
        ends_at: Timestamp::UNIX_EPOCH + SignedDuration::from_hours(24),
        status: PromotionStatus::Active,
        price: 1_000,
        payment_status: PaymentStatus::Pending,
        impressions: 0,
        clicks: 0,
        conversions: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

const BOUNDARY: &str = "marketplace-test-boundary";

/// A `multipart/form-data` body with one file part per `(file name, content type, bytes)`.
///
/// Returns the content type header value and the body.
pub(crate) fn multipart_files(field: &str, files: &[(&str, &str, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (file_name, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
