//! User Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::users::UsersServiceError;

use crate::errors::invalid;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user payload"),
        UsersServiceError::Validation(reason) => invalid(&reason),
        UsersServiceError::AdminProtected => {
            StatusError::forbidden().brief("Cannot deactivate admin users")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
