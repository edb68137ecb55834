//! # Error Types
//!
//! Validation errors for the sale engine.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, amounts, dates)
//! 3. Errors are enum variants, never String
//!
//! Validation failures are detected *before* any write happens, so a caller
//! receiving one of these can be sure no partial state was created.

use chrono::NaiveDate;
use thiserror::Error;

/// Input validation errors.
///
/// These occur when caller input doesn't meet the engine's requirements.
/// They are caller errors: retrying without changing the input will fail
/// again.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A sale must carry at least one line item.
    #[error("a sale must include at least one line item")]
    EmptyItems,

    /// A numeric field that must not be negative was negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: &'static str },

    /// The caller-supplied sale total does not match the sum of its line
    /// items.
    ///
    /// ## Why reject instead of silently correcting?
    /// A mismatch means the client computed something different than we
    /// did. Silently writing our sum would make receipts disagree with
    /// what the cashier saw on screen.
    #[error("sale total {provided_cents} does not match line item sum {computed_cents}")]
    TotalMismatch {
        provided_cents: i64,
        computed_cents: i64,
    },

    /// Report date range where `from` is after `to`.
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::TotalMismatch {
            provided_cents: 1000,
            computed_cents: 1050,
        };
        assert_eq!(
            err.to_string(),
            "sale total 1000 does not match line item sum 1050"
        );

        let err = ValidationError::MustBeNonNegative { field: "quantity" };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }
}
