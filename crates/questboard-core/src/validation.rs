//! Field validation helpers shared by command handlers.

use crate::error::DomainError;

/// Trims `value` and checks its length (in characters) lies in `min..=max`.
///
/// Returns the trimmed value on success.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming `field` when the trimmed value is
/// too short or too long.
pub fn require_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(DomainError::Validation(format!(
            "{field} must be between {min} and {max} characters, got {len}"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Checks that `value` is strictly positive.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming `field` otherwise.
pub fn require_positive(field: &str, value: i64) -> Result<i64, DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(value)
}
