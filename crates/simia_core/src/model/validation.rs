//! Field-level validation shared across entities.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@<>]+@[^\s@<>]+\.[^\s@<>]+$").expect("valid email regex")
});
static KRA_PIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]{9}[A-Z]$").expect("valid kra pin regex"));

/// Validation error for entity invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Required text field is blank after trim.
    BlankField(&'static str),
    /// Monetary amount is below zero.
    NegativeAmount { field: &'static str, value: i64 },
    /// Email address is malformed.
    InvalidEmail(String),
    /// KRA PIN does not match `A#########A`.
    InvalidKraPin(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::NegativeAmount { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidKraPin(value) => write!(f, "invalid KRA PIN: `{value}`"),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: i64,
) -> Result<(), ModelValidationError> {
    if value < 0 {
        return Err(ModelValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Returns whether `value` looks like a deliverable email address.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Uppercases and checks a KRA PIN; returns the normalized PIN.
pub fn normalize_kra_pin(value: &str) -> Result<String, ModelValidationError> {
    let normalized = value.trim().to_ascii_uppercase();
    if !KRA_PIN_RE.is_match(&normalized) {
        return Err(ModelValidationError::InvalidKraPin(value.to_string()));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, normalize_kra_pin, ModelValidationError};

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("sarah@simia.com"));
        assert!(!is_valid_email("sarah@"));
        assert!(!is_valid_email("Sarah <sarah@simia.com>"));
    }

    #[test]
    fn kra_pin_is_uppercased_and_checked() {
        assert_eq!(normalize_kra_pin(" a000123456k ").unwrap(), "A000123456K");
        assert!(matches!(
            normalize_kra_pin("A12345"),
            Err(ModelValidationError::InvalidKraPin(_))
        ));
    }
}
