//! Role, approval and ownership gates.

use thiserror::Error;

use crate::{
    auth::AuthenticatedUser,
    domain::{
        products::data::Actor,
        users::records::Role,
        vendors::records::{VendorRecord, VendorStatus, VendorUuid},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("User role '{0}' is not authorized to access this route")]
    RoleNotAllowed(Role),

    #[error("Only vendors can access this route")]
    NotVendor,

    #[error("Vendor profile not found")]
    VendorProfileMissing,

    #[error("Vendor account is {0}. Please wait for admin approval.")]
    VendorNotApproved(VendorStatus),

    #[error("Not authorized to modify this resource")]
    NotOwner,
}

impl AccessError {
    /// HTTP status conventionally used for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::VendorProfileMissing => 404,
            Self::RoleNotAllowed(_) | Self::NotVendor | Self::VendorNotApproved(_) | Self::NotOwner => {
                403
            }
        }
    }
}

/// Require a user whose role is one of `allowed`.
///
/// # Errors
///
/// Returns [`AccessError::Unauthenticated`] without a user and
/// [`AccessError::RoleNotAllowed`] when the role is outside `allowed`.
pub fn authorize<'a>(
    user: Option<&'a AuthenticatedUser>,
    allowed: &[Role],
) -> Result<&'a AuthenticatedUser, AccessError> {
    let user = user.ok_or(AccessError::Unauthenticated)?;

    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AccessError::RoleNotAllowed(user.role))
    }
}

/// Require a vendor user with an approved vendor profile.
///
/// # Errors
///
/// Fails for non-vendors, vendors without a profile, and vendors awaiting approval or blocked.
pub fn require_approved_vendor(
    user: &AuthenticatedUser,
    vendor: Option<&VendorRecord>,
) -> Result<VendorUuid, AccessError> {
    if user.role != Role::Vendor {
        return Err(AccessError::NotVendor);
    }

    let vendor = vendor.ok_or(AccessError::VendorProfileMissing)?;

    if vendor.status != VendorStatus::Approved {
        return Err(AccessError::VendorNotApproved(vendor.status));
    }

    Ok(vendor.uuid)
}

/// Require that `actor` may act on a resource owned by `owner`. Admins always may.
///
/// # Errors
///
/// Returns [`AccessError::NotOwner`] otherwise.
pub fn ensure_owner(actor: Actor, owner: VendorUuid) -> Result<(), AccessError> {
    if actor.can_manage(owner) {
        Ok(())
    } else {
        Err(AccessError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::records::UserUuid,
        test::helpers::make_vendor,
    };

    use super::*;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            uuid: UserUuid::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn authorize_without_user_is_unauthenticated() {
        assert_eq!(
            authorize(None, &[Role::Admin]),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn authorize_accepts_listed_roles() -> TestResult {
        let vendor = user(Role::Vendor);

        assert_eq!(authorize(Some(&vendor), &[Role::Vendor, Role::Admin])?, &vendor);

        Ok(())
    }

    #[test]
    fn authorize_rejects_other_roles_with_message() {
        let customer = user(Role::Customer);

        let error = authorize(Some(&customer), &[Role::Admin]).err();

        assert_eq!(error, Some(AccessError::RoleNotAllowed(Role::Customer)));
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("User role 'customer' is not authorized to access this route".to_string())
        );
    }

    #[test]
    fn approved_vendor_gate() {
        let owner = user(Role::Vendor);
        let mut vendor = make_vendor(owner.uuid, VendorStatus::Approved);

        assert_eq!(require_approved_vendor(&owner, Some(&vendor)), Ok(vendor.uuid));
        assert_eq!(
            require_approved_vendor(&owner, None),
            Err(AccessError::VendorProfileMissing)
        );
        assert_eq!(
            require_approved_vendor(&user(Role::Customer), Some(&vendor)),
            Err(AccessError::NotVendor)
        );

        vendor.status = VendorStatus::Pending;
        let error = require_approved_vendor(&owner, Some(&vendor)).err();

        assert_eq!(
            error.map(|e| e.to_string()),
            Some("Vendor account is pending. Please wait for admin approval.".to_string())
        );
    }

    #[test]
    fn ownership_gate() {
        let owner = VendorUuid::new();

        assert_eq!(ensure_owner(Actor::Vendor(owner), owner), Ok(()));
        assert_eq!(ensure_owner(Actor::Admin, owner), Ok(()));
        assert_eq!(
            ensure_owner(Actor::Vendor(VendorUuid::new()), owner),
            Err(AccessError::NotOwner)
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(AccessError::Unauthenticated.status_code(), 401);
        assert_eq!(AccessError::VendorProfileMissing.status_code(), 404);
        assert_eq!(AccessError::NotOwner.status_code(), 403);
    }
}
