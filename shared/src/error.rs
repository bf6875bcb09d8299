//! Boundary validation errors
//!
//! Raised when a caller-supplied value cannot be accepted: unknown
//! categorical text, out-of-range numbers, unparsable dates.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text that does not name any variant of a closed enum
    #[error("Unknown {field} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// A field that is present but violates its rule
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
