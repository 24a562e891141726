//! Auth Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use marketplace_app::auth::AuthServiceError;

use crate::errors::invalid;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::EmailTaken => StatusError::conflict().brief("Email already registered"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::IncorrectPassword => {
            StatusError::unauthorized().brief("Current password is incorrect")
        }
        AuthServiceError::AccountDeactivated => {
            StatusError::forbidden().brief("Account has been deactivated")
        }
        AuthServiceError::InvalidToken(source) => {
            warn!("rejected bearer token: {source}");

            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::UserNotFound => StatusError::unauthorized().brief("User not found"),
        AuthServiceError::Validation(reason) => invalid(&reason),
        AuthServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
