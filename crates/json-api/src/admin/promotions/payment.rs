//! Promotion Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::promotions::records::PaymentStatus;

use crate::{
    envelope::{self, ApiResponse},
    errors::unparsable,
    extensions::*,
    promotions::{self, PromotionResponse},
    state::State,
};

/// Payment Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentStatusRequest {
    /// `pending`, `paid` or `refunded`
    pub payment_status: String,
}

/// Record a promotion's payment outcome.
#[endpoint(
    tags("admin"),
    summary = "Set Promotion Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payment status"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
#[tracing::instrument(
    name = "admin.promotions.payment",
    skip(promotion, json, depot),
    fields(promotion_uuid = tracing::field::Empty, payment_status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    promotion: PathParam<Uuid>,
    json: JsonBody<PaymentStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<PromotionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let promotion = promotion.into_inner().into();
    let status = json
        .into_inner()
        .payment_status
        .parse::<PaymentStatus>()
        .map_err(unparsable)?;

    let span = tracing::Span::current();

    span.record("promotion_uuid", tracing::field::display(promotion));
    span.record("payment_status", status.as_str());

    let updated = state
        .app
        .promotions
        .update_payment_status(promotion, status)
        .await
        .map_err(promotions::into_status_error)?;

    tracing::info!(promotion_uuid = %updated.uuid, payment_status = status.as_str(), "updated payment status");

    Ok(envelope::data_with_message(
        "Payment status updated successfully",
        PromotionResponse::from(updated),
    ))
}
