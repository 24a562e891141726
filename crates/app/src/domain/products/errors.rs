//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    auth::AccessError,
    domain::{validation::ValidationError, vendors::records::VendorStatus},
    uploads::UploadError,
};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("not authorized to manage this product")]
    Forbidden,

    #[error("vendor account is {0}")]
    VendorNotApproved(VendorStatus),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Ownership failures surface as `Forbidden`; an unapproved vendor keeps its status.
impl From<AccessError> for ProductsServiceError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            ProductsServiceError::from(Error::RowNotFound),
            ProductsServiceError::NotFound
        ));
    }

    #[test]
    fn ownership_failures_are_forbidden() {
        assert!(matches!(
            ProductsServiceError::from(AccessError::NotOwner),
            ProductsServiceError::Forbidden
        ));
        assert!(matches!(
            ProductsServiceError::from(AccessError::VendorNotApproved(VendorStatus::Blocked)),
            ProductsServiceError::VendorNotApproved(VendorStatus::Blocked)
        ));
    }

    #[test]
    fn other_errors_are_storage_errors() {
        assert!(matches!(
            ProductsServiceError::from(Error::PoolTimedOut),
            ProductsServiceError::Sql(_)
        ));
    }
}
