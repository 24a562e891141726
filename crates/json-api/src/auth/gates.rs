//! Role and approved-vendor gates. Both run after [`super::middleware::protect`].

use std::sync::Arc;

use salvo::prelude::*;

use marketplace_app::{
    auth::{authorize, require_approved_vendor},
    domain::{
        users::records::Role,
        vendors::{VendorsServiceError, records::VendorUuid},
    },
};

use crate::{errors::access_denied, extensions::*, state::State, vendors::into_status_error};

/// Allow only callers whose role is listed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequireRoles(pub &'static [Role]);

pub(crate) const ADMIN: RequireRoles = RequireRoles(&[Role::Admin]);

pub(crate) const VENDOR: RequireRoles = RequireRoles(&[Role::Vendor]);

#[handler]
impl RequireRoles {
    async fn handle(&self, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
        if let Err(error) = authorize(depot.current_user(), self.0) {
            res.render(access_denied(&error));
            ctrl.skip_rest();
        }
    }
}

/// Allow only vendors whose profile an admin approved, and remember which vendor it is.
#[handler]
pub(crate) async fn approved_vendor(depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    match resolve_approved_vendor(depot).await {
        Ok(vendor) => depot.insert_vendor_uuid(vendor),
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn resolve_approved_vendor(depot: &Depot) -> Result<VendorUuid, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let vendor = if user.role == Role::Vendor {
        match state.app.vendors.get_vendor_for_user(user.uuid).await {
            Ok(vendor) => Some(vendor),
            Err(VendorsServiceError::NotFound) => None,
            Err(error) => return Err(into_status_error(error)),
        }
    } else {
        None
    };

    require_approved_vendor(user, vendor.as_ref()).map_err(|error| access_denied(&error))
}
