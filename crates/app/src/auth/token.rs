//! JWT issuing and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::{Role, UserUuid};

/// Token lifetime when none is configured.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user(&self) -> UserUuid {
        UserUuid::from_uuid(self.sub)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// A signed token and the moment it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signs and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Build an issuer from a shared secret. The caller's copy of the secret is wiped.
    #[must_use]
    pub fn new(mut secret: String, ttl: SignedDuration) -> Self {
        let issuer = Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        };

        secret.zeroize();

        issuer
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Issue a token for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, user: UserUuid, role: Role) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, role, Timestamp::now())
    }

    pub(crate) fn issue_at(
        &self,
        user: UserUuid,
        role: Role,
        now: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now.saturating_add(self.ttl).unwrap_or(Timestamp::MAX);

        let claims = Claims {
            sub: user.into_uuid(),
            role: role.as_str().to_string(),
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns an error for a bad signature, a malformed token, or an expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret".to_string(), DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn issued_token_verifies() -> TestResult {
        let user = UserUuid::new();

        let issued = issuer().issue(user, Role::Vendor)?;
        let claims = issuer().verify(&issued.token)?;

        assert_eq!(claims.user(), user);
        assert_eq!(claims.role, "vendor");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);

        Ok(())
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() -> TestResult {
        let other = TokenIssuer::new("other-secret".to_string(), DEFAULT_TOKEN_TTL);
        let issued = other.issue(UserUuid::new(), Role::Customer)?;

        assert!(issuer().verify(&issued.token).is_err());

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let issued_at = Timestamp::now() - SignedDuration::from_hours(8 * 24);
        let issued = issuer().issue_at(UserUuid::new(), Role::Customer, issued_at)?;

        assert!(issuer().verify(&issued.token).is_err());

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer().verify("not.a.token").is_err());
    }

    #[test]
    fn debug_hides_secret() {
        assert!(!format!("{:?}", issuer()).contains("test-secret"));
    }
}
