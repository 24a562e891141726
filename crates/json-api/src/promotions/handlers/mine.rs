//! Vendor's Own Promotions Handler

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::domain::pagination::DEFAULT_PAGE_LIMIT;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    promotions::{errors::into_status_error, responses::PromotionResponse},
    state::State,
};

/// The caller's promotions, newest first. Overdue ones read as `expired`.
#[endpoint(
    tags("promotions"),
    summary = "My Promotions",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "Promotion page")),
)]
pub(crate) async fn handler(
    page: PageParams,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<PromotionResponse>>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;

    let page = state
        .app
        .promotions
        .list_vendor_promotions(vendor, page.into_request(DEFAULT_PAGE_LIMIT)?)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::page(page))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::{
        pagination::Page,
        products::records::ProductUuid,
        promotions::{
            MockPromotionsService,
            records::{PromotionStatus, PromotionUuid},
        },
    };

    use crate::test_helpers::{Mocks, TEST_VENDOR_UUID, make_promotion, vendor_service};

    use super::*;

    #[tokio::test]
    async fn test_my_promotions() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_list_vendor_promotions()
            .once()
            .withf(|vendor, page| *vendor == TEST_VENDOR_UUID && page.page() == 1)
            .return_once(|_, page| {
                let mut expired = make_promotion(PromotionUuid::new(), ProductUuid::new());
                expired.status = PromotionStatus::Expired;

                Ok(Page::new(vec![expired], page, 1))
            });

        let mut res = TestClient::get("http://example.com/promotions/mine")
            .send(&vendor_service(
                Mocks {
                    promotions,
                    ..Mocks::default()
                },
                Router::with_path("promotions/mine").get(handler),
            ))
            .await;

        let body: ApiResponse<Vec<PromotionResponse>> = res.take_json().await?;
        let items = body.data.ok_or("missing promotions")?;

        assert_eq!(
            items.iter().map(|promotion| promotion.status.as_str()).collect::<Vec<_>>(),
            ["expired"]
        );

        Ok(())
    }
}
