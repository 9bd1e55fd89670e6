//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so every write path
//! goes through these.

use shared::TimeOfDay;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: shop, service, customer.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, block reasons.
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers and the like.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Slot length bounds in minutes.
pub const MIN_SERVICE_DURATION: i64 = 1;
pub const MAX_SERVICE_DURATION: i64 = 1440;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Unwrap a required request field, naming it in the error.
pub fn require_field<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(format!("{field} is required")))
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Passwords: bounded length, never trimmed.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

/// Light email shape check: something@something, bounded length.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation(format!("Invalid email: {email}"))),
    }
}

/// Business hours must form a non-empty window.
pub fn validate_business_hours(open: TimeOfDay, close: TimeOfDay) -> Result<(), AppError> {
    if open >= close {
        return Err(AppError::validation(format!(
            "openTime {open} must be before closeTime {close}"
        )));
    }
    Ok(())
}

/// Slot length in minutes, bounded to a single day.
pub fn validate_service_duration(minutes: i64) -> Result<(), AppError> {
    if !(MIN_SERVICE_DURATION..=MAX_SERVICE_DURATION).contains(&minutes) {
        return Err(AppError::validation(format!(
            "serviceDuration must be between {MIN_SERVICE_DURATION} and {MAX_SERVICE_DURATION} minutes, got {minutes}"
        )));
    }
    Ok(())
}
