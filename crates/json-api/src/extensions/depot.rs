//! Depot helper extensions.

use std::any::Any;

use marketplace_app::{auth::AuthenticatedUser, domain::vendors::records::VendorUuid};
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user(&mut self, user: AuthenticatedUser);

    /// The caller, when a valid bearer token was presented.
    fn current_user(&self) -> Option<&AuthenticatedUser>;

    fn user_or_401(&self) -> Result<&AuthenticatedUser, StatusError>;

    fn insert_vendor_uuid(&mut self, vendor: VendorUuid);

    /// The caller's approved vendor, set by the approved-vendor gate.
    fn vendor_uuid_or_403(&self) -> Result<VendorUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user(&mut self, user: AuthenticatedUser) {
        self.inject(user);
    }

    fn current_user(&self) -> Option<&AuthenticatedUser> {
        self.obtain::<AuthenticatedUser>().ok()
    }

    fn user_or_401(&self) -> Result<&AuthenticatedUser, StatusError> {
        self.current_user()
            .ok_or_else(|| StatusError::unauthorized().brief("Not authorized, no token"))
    }

    fn insert_vendor_uuid(&mut self, vendor: VendorUuid) {
        self.inject(vendor);
    }

    fn vendor_uuid_or_403(&self) -> Result<VendorUuid, StatusError> {
        self.obtain::<VendorUuid>()
            .copied()
            .map_err(|_ignored| StatusError::forbidden().brief("Only vendors can access this route"))
    }
}
