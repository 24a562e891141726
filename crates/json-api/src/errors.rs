//! Status errors shared by several resources.

use std::{error::Error, fmt::Display};

use marketplace_app::{
    auth::AccessError, domain::validation::ValidationError, uploads::UploadError,
};
use salvo::http::{StatusCode, StatusError};
use tracing::error;

/// Role, approval and ownership failures keep their message and conventional status.
pub(crate) fn access_denied(error: &AccessError) -> StatusError {
    StatusCode::from_u16(error.status_code())
        .ok()
        .and_then(StatusError::from_code)
        .unwrap_or_else(StatusError::forbidden)
        .brief(error.to_string())
}

/// A client value that failed to parse, reported with the parser's message.
pub(crate) fn unparsable(error: impl Display) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}

pub(crate) fn invalid(error: &ValidationError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}

pub(crate) fn upload_failed(error: UploadError) -> StatusError {
    match error {
        UploadError::InvalidType | UploadError::TooLarge | UploadError::TooMany => {
            StatusError::bad_request().brief(error.to_string())
        }
        UploadError::InvalidFilename | UploadError::Io(_) => {
            error!("failed to store upload: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Log an unexpected storage failure and hide it behind a 500.
pub(crate) fn storage_failed(context: &str, source: &dyn Error) -> StatusError {
    error!("{context}: {source}");

    StatusError::internal_server_error()
}
