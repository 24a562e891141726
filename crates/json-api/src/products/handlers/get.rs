//! Get Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use marketplace_app::{
    auth::AuthenticatedUser,
    domain::{products::data::Actor, users::records::Role, vendors::VendorsServiceError},
};

use crate::{
    envelope::{self, ApiResponse},
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
    vendors,
};

/// Admins see everything. Vendors see their own hidden products. Everyone else is public.
async fn viewer(state: &State, user: Option<&AuthenticatedUser>) -> Result<Actor, StatusError> {
    let Some(user) = user else {
        return Ok(Actor::Public);
    };

    match user.role {
        Role::Admin => Ok(Actor::Admin),
        Role::Vendor => match state.app.vendors.get_vendor_for_user(user.uuid).await {
            Ok(vendor) => Ok(Actor::Vendor(vendor.uuid)),
            Err(VendorsServiceError::NotFound) => Ok(Actor::Public),
            Err(error) => Err(vendors::into_status_error(error)),
        },
        Role::Customer => Ok(Actor::Public),
    }
}

/// Get Product Handler
///
/// Counts a view.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApiResponse<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = viewer(state, depot.current_user()).await?;

    let record = state
        .app
        .products
        .get_product(product.into_inner().into(), actor)
        .await
        .map_err(into_status_error)?;

    Ok(envelope::data(ProductResponse::from(record)))
}
