//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement and the legacy schema
//! has no CHECK constraints, so payloads are checked here before writing.

use shared::ValidationError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: provider, receiver, food item
pub const MAX_NAME_LEN: usize = 200;

/// Cities
pub const MAX_CITY_LEN: usize = 100;

/// Phone numbers, emails and other contact strings
pub const MAX_CONTACT_LEN: usize = 100;

/// Street addresses and pickup locations
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::invalid(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::invalid(
            field,
            format!("is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Validate that a string is within the length limit (may be empty).
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::invalid(
            field,
            format!("is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Quantities are positive integers.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::invalid(
            "quantity",
            format!("must be at least 1, got {quantity}"),
        ));
    }
    Ok(())
}
