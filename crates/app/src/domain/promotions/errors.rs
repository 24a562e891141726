//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    auth::AccessError,
    domain::{
        promotions::records::PromotionStatus, validation::ValidationError,
        vendors::records::VendorStatus,
    },
};

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion already exists")]
    AlreadyExists,

    #[error("promotion not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("not authorized to manage this promotion")]
    Forbidden,

    #[error("vendor account is {0}")]
    VendorNotApproved(VendorStatus),

    #[error("promotion is {0}")]
    NotActive(PromotionStatus),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Ownership failures surface as `Forbidden`; an unapproved vendor keeps its status.
impl From<AccessError> for PromotionsServiceError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::VendorNotApproved(status) => Self::VendorNotApproved(status),
            AccessError::Unauthenticated
            | AccessError::RoleNotAllowed(_)
            | AccessError::NotVendor
            | AccessError::VendorProfileMissing
            | AccessError::NotOwner => Self::Forbidden,
        }
    }
}
