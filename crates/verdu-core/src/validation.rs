//! # Validation Module
//!
//! Business rule validation for sale input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Boundary (verdu-service)                                  │
//! │  ├── Typed input structs (deserialization already happened)         │
//! │  └── THIS MODULE: business rule validation, before any write        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Database (SQLite)                                         │
//! │  ├── NOT NULL / CHECK constraints                                   │
//! │  ├── UNIQUE constraints on reference names                          │
//! │  └── Foreign key constraints                                        │
//! │                                                                     │
//! │  A failed check here returns before a single row is written.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::types::NewSaleItem;

/// Validates the line items of a sale.
///
/// ## Rules
/// - At least one item (an empty sale is a client error)
/// - Quantity, unit price and line total must not be negative
/// - Weight, when present, must not be negative
///
/// ## Example
/// ```rust
/// use verdu_core::types::NewSaleItem;
/// use verdu_core::validation::validate_items;
///
/// let item = NewSaleItem {
///     article_id: None,
///     quantity: 1,
///     unit_price_cents: 3550,
///     weight: Some(70.0),
///     total_cents: 3550,
/// };
/// assert!(validate_items(&[item]).is_ok());
/// assert!(validate_items(&[]).is_err());
/// ```
pub fn validate_items(items: &[NewSaleItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    for item in items {
        if item.quantity < 0 {
            return Err(ValidationError::MustBeNonNegative { field: "quantity" });
        }
        if item.unit_price_cents < 0 {
            return Err(ValidationError::MustBeNonNegative {
                field: "unit_price",
            });
        }
        if item.total_cents < 0 {
            return Err(ValidationError::MustBeNonNegative { field: "total" });
        }
        if item.weight.is_some_and(|w| w < 0.0) {
            return Err(ValidationError::MustBeNonNegative { field: "weight" });
        }
    }

    Ok(())
}

/// Sums the line item totals, in cents.
pub fn item_total_cents(items: &[NewSaleItem]) -> i64 {
    items.iter().map(|item| item.total_cents).sum()
}

/// Validates a complete sale draft: items plus the caller-supplied total.
///
/// The total is recomputed from the line items and a mismatch is rejected
/// rather than silently corrected, so a buggy client can't persist a sale
/// whose header disagrees with its items.
pub fn validate_sale(total_cents: i64, items: &[NewSaleItem]) -> ValidationResult<()> {
    validate_items(items)?;

    if total_cents < 0 {
        return Err(ValidationError::MustBeNonNegative { field: "total" });
    }

    let computed = item_total_cents(items);
    if computed != total_cents {
        return Err(ValidationError::TotalMismatch {
            provided_cents: total_cents,
            computed_cents: computed,
        });
    }

    Ok(())
}

/// Validates a report date range (inclusive bounds, `from <= to`).
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> ValidationResult<()> {
    if from > to {
        return Err(ValidationError::InvalidDateRange { from, to });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
