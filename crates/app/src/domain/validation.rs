//! Input validation helpers shared by the domain services.

use thiserror::Error;

/// A field failed validation. The message is safe to show to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Trim a required field and check its length in characters.
pub(crate) fn required_text(
    field: &str,
    value: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} is required")));
    }

    if trimmed.chars().count() > max_chars {
        return Err(ValidationError::new(format!(
            "{field} cannot exceed {max_chars} characters"
        )));
    }

    Ok(trimmed.to_owned())
}

/// Trim an optional field. Blank values become `None`.
pub(crate) fn optional_text(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => required_text(field, trimmed, max_chars).map(Some),
    }
}

/// Prices, stock levels and price bounds are stored as `BIGINT`.
pub fn amount(field: &str, value: u64) -> Result<u64, ValidationError> {
    if i64::try_from(value).is_err() {
        return Err(ValidationError::new(format!("{field} is too large")));
    }

    Ok(value)
}

/// Lower-case and check an email address.
pub(crate) fn normalize_email(value: &str) -> Result<String, ValidationError> {
    let email = value.trim().to_lowercase();
    let invalid = || ValidationError::new("Please provide a valid email");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;

    if host.is_empty() || host.starts_with('.') || tld.chars().count() < 2 {
        return Err(invalid());
    }

    Ok(email)
}
