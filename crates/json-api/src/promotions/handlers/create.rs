//! Create Promotion Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use marketplace_app::domain::promotions::data::NewPromotion;

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    observability::{self, Event},
    promotions::{
        errors::into_status_error, requests::CreatePromotionRequest, responses::PromotionResponse,
    },
    state::State,
};

/// Create Promotion Handler
///
/// Promotes one of the caller's products until `ends_at`. Payment starts as `pending`.
#[endpoint(
    tags("promotions"),
    summary = "Create Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the product's vendor"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "promotions.create",
    skip(json, depot, res),
    fields(vendor_uuid = tracing::field::Empty, promotion_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ApiResponse<PromotionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.vendor_uuid_or_403()?;
    let promotion = NewPromotion::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("vendor_uuid", tracing::field::display(vendor));

    let created = state
        .app
        .promotions
        .create_promotion(vendor, promotion)
        .await
        .map_err(into_status_error)?;

    span.record("promotion_uuid", tracing::field::display(created.uuid));

    res.add_header(LOCATION, format!("/api/promotions/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    observability::record(Event::PromotionCreated);
    tracing::info!(promotion_uuid = %created.uuid, "created promotion");

    Ok(envelope::data_with_message(
        "Promotion created successfully",
        PromotionResponse::from(created),
    ))
}
