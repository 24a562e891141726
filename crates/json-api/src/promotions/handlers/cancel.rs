//! Cancel Promotion Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    promotions::{errors::into_status_error, responses::PromotionResponse},
    state::State,
};

/// Cancel Promotion Handler
///
/// The product stays promoted while another of its promotions is still running.
#[endpoint(
    tags("promotions"),
    summary = "Cancel Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Promotion is not active"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the promotion's vendor"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(
    name = "promotions.cancel",
    skip(promotion, depot),
    fields(vendor_uuid = tracing::field::Empty, promotion_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PromotionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;
    let promotion = promotion.into_inner().into();

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));
    span.record("promotion_uuid", tracing::field::display(promotion));

    let cancelled = state
        .app
        .promotions
        .cancel_promotion(vendor, promotion)
        .await
        .map_err(into_status_error)?;

    tracing::info!(promotion_uuid = %cancelled.uuid, "cancelled promotion");

    Ok(envelope::data_with_message(
        "Promotion cancelled successfully",
        PromotionResponse::from(cancelled),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::{
        products::records::ProductUuid,
        promotions::{
            MockPromotionsService, PromotionsServiceError,
            records::{PromotionStatus, PromotionUuid},
        },
    };

    use crate::test_helpers::{Mocks, TEST_VENDOR_UUID, make_promotion, vendor_service};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        vendor_service(
            Mocks {
                promotions,
                ..Mocks::default()
            },
            Router::with_path("promotions/{promotion}/cancel").post(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_promotion_success() -> TestResult {
        let uuid = PromotionUuid::new();
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_cancel_promotion()
            .once()
            .withf(move |vendor, promotion| *vendor == TEST_VENDOR_UUID && *promotion == uuid)
            .return_once(|_, promotion| {
                let mut record = make_promotion(promotion, ProductUuid::new());
                record.status = PromotionStatus::Cancelled;

                Ok(record)
            });

        let mut res = TestClient::post(format!("http://example.com/promotions/{uuid}/cancel"))
            .send(&make_service(promotions))
            .await;

        let body: ApiResponse<PromotionResponse> = res.take_json().await?;

        assert_eq!(body.message.as_deref(), Some("Promotion cancelled successfully"));
        assert_eq!(body.data.map(|promotion| promotion.status), Some("cancelled".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_expired_promotion_returns_400() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_cancel_promotion()
            .once()
            .return_once(|_, _| Err(PromotionsServiceError::NotActive(PromotionStatus::Expired)));

        let res = TestClient::post(format!(
            "http://example.com/promotions/{}/cancel",
            PromotionUuid::new()
        ))
        .send(&make_service(promotions))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
