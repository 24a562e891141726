//! Password hashing.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Shortest password accepted at registration or password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(password_hash::Error);

/// Hash a password with argon2id and a random salt.
///
/// # Errors
///
/// Returns an error if the hasher rejects its parameters.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError)
}

/// Check a password against a stored hash.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(PasswordError)?;

    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError(error)),
    }
}
