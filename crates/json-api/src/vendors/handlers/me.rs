//! Own Vendor Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    state::State,
    vendors::{VendorResponse, into_status_error},
};

/// The caller's vendor profile, whatever its approval status.
#[endpoint(
    tags("vendors"),
    summary = "My Vendor Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Vendor profile"),
        (status_code = StatusCode::NOT_FOUND, description = "No vendor profile yet"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<VendorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.user_or_401()?;

    let vendor = state
        .app
        .vendors
        .get_vendor_for_user(caller.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data_with_message(
        "Vendor profile retrieved",
        VendorResponse::from(vendor),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::{
        users::records::Role,
        vendors::{
            MockVendorsService, VendorsServiceError,
            records::{VendorStatus, VendorUuid},
        },
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_vendor, user_service};

    use super::*;

    fn make_service(vendors: MockVendorsService) -> Service {
        user_service(
            Mocks {
                vendors,
                ..Mocks::default()
            },
            Role::Vendor,
            Router::with_path("vendors/profile/me").get(handler),
        )
    }

    #[tokio::test]
    async fn test_pending_vendor_sees_own_profile() -> TestResult {
        let uuid = VendorUuid::new();
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_get_vendor_for_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(make_vendor(uuid, VendorStatus::Pending)));

        let mut res = TestClient::get("http://example.com/vendors/profile/me")
            .send(&make_service(vendors))
            .await;

        let body: ApiResponse<VendorResponse> = res.take_json().await?;

        assert_eq!(body.message.as_deref(), Some("Vendor profile retrieved"));
        assert_eq!(body.data.map(|vendor| vendor.status), Some("pending".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_profile_returns_404() -> TestResult {
        let mut vendors = MockVendorsService::new();

        vendors
            .expect_get_vendor_for_user()
            .once()
            .return_once(|_| Err(VendorsServiceError::NotFound));

        let res = TestClient::get("http://example.com/vendors/profile/me")
            .send(&make_service(vendors))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
