//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    auth::{PasswordError, TokenError},
    domain::validation::ValidationError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Account has been deactivated")]
    AccountDeactivated,

    #[error("Invalid or expired token")]
    InvalidToken(#[from] TokenError),

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("password error")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::UserNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
