//! # verdu-core: Pure Business Logic for Verdu POS
//!
//! This crate is the **heart** of the sale engine. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Verdu POS Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                 verdu-service (boundary ops)                  │ │
//! │  │   CreateSale, GetSale, ListSales, Report, ReprintSale, ...    │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                 │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │               ★ verdu-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐   │ │
//! │  │   │  types   │  │  money   │  │ receipt  │  │ validation │   │ │
//! │  │   │  Sale    │  │  Money   │  │ renderer │  │   rules    │   │ │
//! │  │   │ SaleItem │  │  cents   │  │  lines   │  │   checks   │   │ │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────┘   │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                 │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │                  verdu-db (SQLite repositories)               │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, SaleItem, SalesReport, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`receipt`] - Fixed-width receipt rendering for the thermal printer
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network, clock access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use receipt::ReceiptLine;
pub use types::*;
pub use validation::{validate_date_range, validate_items, validate_sale};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Payment-method id for cash sales.
///
/// ## Why a constant?
/// Reports split cash vs credit by the seeded payment-method rows, not by
/// a name match. Renaming "Efectivo" in the reference table must not change
/// what the report counts as cash.
pub const CASH_PAYMENT_METHOD_ID: i64 = 1;

/// Payment-method id for credit sales. Same reasoning as
/// [`CASH_PAYMENT_METHOD_ID`].
pub const CREDIT_PAYMENT_METHOD_ID: i64 = 3;

/// Placeholder shown where a vendor/payment/article reference is missing.
/// Sale listings and receipts never surface a null name.
pub const NAME_PLACEHOLDER: &str = "-";
