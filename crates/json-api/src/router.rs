//! App Router

use salvo::Router;

use crate::{
    admin,
    auth::{
        self,
        gates::{ADMIN, VENDOR, approved_vendor},
        middleware::{optional_auth, protect},
    },
    categories, healthcheck, products, promotions,
    uploads::limit_upload_size,
    users, vendors,
};

/// Every JSON route below `/api`.
pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(auth_router())
        .push(products_router())
        .push(users_router())
        .push(vendors_router())
        .push(categories_router())
        .push(promotions_router())
        .push(admin_router())
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(auth::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(Router::with_path("logout").post(auth::logout::handler))
        .push(
            Router::new()
                .hoop(protect)
                .push(Router::with_path("me").get(auth::me::handler))
                .push(Router::with_path("profile").put(auth::profile::handler))
                .push(Router::with_path("password").put(auth::password::handler)),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        // Ahead of `{product}` so the literal segment wins.
        .push(
            Router::with_path("vendor/my-products")
                .hoop(protect)
                .hoop(VENDOR)
                .hoop(approved_vendor)
                .get(products::mine::handler),
        )
        .push(
            Router::new()
                .hoop(optional_auth)
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("{product}/click").post(products::click::handler))
        .push(
            Router::new()
                .hoop(protect)
                .push(Router::with_path("{product}/save").post(products::save::handler))
                .push(
                    Router::new()
                        .hoop(VENDOR)
                        .hoop(approved_vendor)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        )
                        .push(
                            Router::with_path("{product}/images")
                                .hoop(limit_upload_size)
                                .put(products::images::handler),
                        ),
                ),
        )
}

fn users_router() -> Router {
    Router::with_path("users/me/saved-products")
        .hoop(protect)
        .get(users::saved::handler)
}

fn vendors_router() -> Router {
    Router::with_path("vendors")
        // Pending vendors manage their own profile, so no approval gate here.
        .push(
            Router::new()
                .hoop(protect)
                .hoop(VENDOR)
                .push(Router::with_path("profile").post(vendors::upsert::handler))
                .push(Router::with_path("profile/me").get(vendors::me::handler))
                .push(
                    Router::with_path("profile/logo")
                        .hoop(limit_upload_size)
                        .put(vendors::logo::handler),
                )
                .push(Router::with_path("analytics/me").get(vendors::analytics::handler)),
        )
        .get(vendors::index::handler)
        .push(Router::with_path("{vendor}").get(vendors::get::handler))
}

fn categories_router() -> Router {
    Router::with_path("categories")
        .get(categories::index::handler)
        .push(Router::with_path("{category}").get(categories::get::handler))
        .push(
            Router::new()
                .hoop(protect)
                .hoop(ADMIN)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                )
                .push(
                    Router::with_path("{category}/image")
                        .hoop(limit_upload_size)
                        .put(categories::image::handler),
                ),
        )
}

fn promotions_router() -> Router {
    Router::with_path("promotions")
        .hoop(protect)
        .hoop(VENDOR)
        .hoop(approved_vendor)
        .post(promotions::create::handler)
        .push(Router::with_path("mine").get(promotions::mine::handler))
        .push(Router::with_path("{promotion}/cancel").post(promotions::cancel::handler))
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(protect)
        .hoop(ADMIN)
        .push(Router::with_path("stats").get(admin::stats::handler))
        .push(
            Router::with_path("vendors")
                .get(admin::vendors::index::handler)
                .push(Router::with_path("{vendor}/status").put(admin::vendors::status::handler)),
        )
        .push(
            Router::with_path("products")
                .get(admin::products::index::handler)
                .push(Router::with_path("{product}").delete(admin::products::delete::handler))
                .push(
                    Router::with_path("{product}/toggle-active")
                        .put(admin::products::toggle::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .get(admin::users::index::handler)
                .push(
                    Router::with_path("{user}/toggle-active").put(admin::users::toggle::handler),
                ),
        )
        .push(
            Router::with_path("promotions")
                .get(admin::promotions::index::handler)
                .push(
                    Router::with_path("{promotion}/payment")
                        .put(admin::promotions::payment::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::{
        pagination::Page, products::MockProductsService, vendors::records::VendorUuid,
    };

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_health_is_public() -> TestResult {
        let res = TestClient::get("http://example.com/api/health")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_is_public() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .return_once(|query| Ok(Page::new(Vec::new(), query.page, 0)));

        let res = TestClient::get("http://example.com/api/products")
            .send(&make_service(Mocks {
                products,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_my_products_requires_token() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_vendor_products().never();
        products.expect_get_product().never();

        let res = TestClient::get("http://example.com/api/products/vendor/my-products")
            .send(&make_service(Mocks {
                products,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() -> TestResult {
        for path in ["stats", "vendors", "products", "users", "promotions"] {
            let res = TestClient::get(format!("http://example.com/api/admin/{path}"))
                .send(&make_service(Mocks::default()))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_writes_require_token() -> TestResult {
        let res = TestClient::put(format!(
            "http://example.com/api/admin/vendors/{}/status",
            VendorUuid::new()
        ))
        .send(&make_service(Mocks::default()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let res = TestClient::post("http://example.com/api/promotions")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
