//! Input validation for profile and listing fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid email format.
    InvalidEmail(String),
    /// Invalid phone number.
    InvalidPhone(String),
    /// Invalid postal code (PIN).
    InvalidPostalCode(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Too many entries in a list field.
    TooMany { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::InvalidPhone(msg) => write!(f, "Invalid phone number: {}", msg),
            ValidationError::InvalidPostalCode(msg) => write!(f, "Invalid postal code: {}", msg),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::TooMany { field, max, actual } => {
                write!(f, "too many {} ({}, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for names and address parts.
pub const MAX_SHORT_TEXT_LENGTH: usize = 120;

/// Maximum allowed length for description and offers.
pub const MAX_LONG_TEXT_LENGTH: usize = 2000;

/// Maximum allowed length for a rejection reason.
pub const MAX_REASON_LENGTH: usize = 500;

/// Maximum number of category tags per agent.
pub const MAX_CATEGORIES: usize = 10;

/// Validate an email address (basic RFC 5322 format check).
///
/// This is a basic validation that checks:
/// - Contains exactly one @
/// - Has at least one character before @
/// - Has at least one character after @
/// - Has at least one dot after @
/// - Is not too long
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    validate_length("email", email, MAX_EMAIL_LENGTH)?;

    // Basic format check: local@domain.tld
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if domain.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing domain (after @)".to_string(),
        ));
    }

    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail(
            "domain cannot start or end with a dot".to_string(),
        ));
    }

    if domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "domain cannot contain consecutive dots".to_string(),
        ));
    }

    Ok(())
}

/// Validate an Indian mobile number.
///
/// Accepts ten digits starting with 6-9, optionally prefixed with `+91`
/// or `0`. Spaces and dashes are ignored. Blank is allowed (the profile is
/// simply incomplete).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits: String = phone
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if digits.is_empty() {
        return Ok(());
    }

    let national = digits
        .strip_prefix("+91")
        .or_else(|| digits.strip_prefix('0'))
        .unwrap_or(&digits);

    if national.len() != 10 || !national.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone(
            "must be a 10-digit mobile number".to_string(),
        ));
    }

    if !matches!(national.as_bytes()[0], b'6'..=b'9') {
        return Err(ValidationError::InvalidPhone(
            "mobile numbers start with 6, 7, 8, or 9".to_string(),
        ));
    }

    Ok(())
}

/// Validate a six-digit PIN code. Blank is allowed.
pub fn validate_postal_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();

    if code.is_empty() {
        return Ok(());
    }

    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPostalCode(
            "must be 6 digits".to_string(),
        ));
    }

    if code.starts_with('0') {
        return Err(ValidationError::InvalidPostalCode(
            "cannot start with 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate a free-text field length (in characters).
pub fn validate_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

/// Validate the category tag list.
pub fn validate_categories(categories: &[String]) -> Result<(), ValidationError> {
    if categories.len() > MAX_CATEGORIES {
        return Err(ValidationError::TooMany {
            field: "categories".to_string(),
            max: MAX_CATEGORIES,
            actual: categories.len(),
        });
    }

    for category in categories {
        validate_length("category", category, MAX_SHORT_TEXT_LENGTH)?;
    }

    Ok(())
}
