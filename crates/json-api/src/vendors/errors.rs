//! Vendor Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::vendors::VendorsServiceError;

use crate::errors::{invalid, upload_failed};

pub(crate) fn into_status_error(error: VendorsServiceError) -> StatusError {
    match error {
        VendorsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Vendor profile already exists")
        }
        VendorsServiceError::NotFound => StatusError::not_found().brief("Vendor not found"),
        VendorsServiceError::InvalidReference | VendorsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid vendor payload")
        }
        VendorsServiceError::Validation(reason) => invalid(&reason),
        VendorsServiceError::Upload(source) => upload_failed(source),
        VendorsServiceError::Sql(source) => {
            error!("vendor storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
