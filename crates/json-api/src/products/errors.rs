//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::{auth::AccessError, domain::products::ProductsServiceError};

use crate::errors::{access_denied, invalid, upload_failed};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Category not found")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Forbidden => access_denied(&AccessError::NotOwner),
        ProductsServiceError::VendorNotApproved(status) => {
            access_denied(&AccessError::VendorNotApproved(status))
        }
        ProductsServiceError::Validation(reason) => invalid(&reason),
        ProductsServiceError::Upload(source) => upload_failed(source),
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
