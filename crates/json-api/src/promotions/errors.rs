//! Promotion Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::{auth::AccessError, domain::promotions::PromotionsServiceError};

use crate::errors::{access_denied, invalid};

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promotion already exists")
        }
        PromotionsServiceError::NotFound => StatusError::not_found().brief("Promotion not found"),
        PromotionsServiceError::InvalidReference => {
            StatusError::not_found().brief("Product not found")
        }
        PromotionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promotion payload")
        }
        PromotionsServiceError::Forbidden => access_denied(&AccessError::NotOwner),
        PromotionsServiceError::VendorNotApproved(status) => {
            access_denied(&AccessError::VendorNotApproved(status))
        }
        PromotionsServiceError::NotActive(status) => {
            StatusError::bad_request().brief(format!(
                "Only active promotions can be cancelled, this one is {status}"
            ))
        }
        PromotionsServiceError::Validation(reason) => invalid(&reason),
        PromotionsServiceError::Sql(source) => {
            error!("promotion storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
