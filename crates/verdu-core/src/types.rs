//! # Domain Types
//!
//! Core domain types for the sale engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐    ┌────────────────┐    ┌────────────────┐    │
//! │  │     Sale       │1  n│    SaleItem    │    │  SalesReport   │    │
//! │  │  ────────────  │────│  ────────────  │    │  ────────────  │    │
//! │  │  id            │    │  id            │    │  total_cents   │    │
//! │  │  date          │    │  sale_id (FK)  │    │  cash_cents    │    │
//! │  │  vendor_id?    │    │  article_id?   │    │  credit_cents  │    │
//! │  │  payment_id?   │    │  quantity      │    │  count         │    │
//! │  │  total_cents   │    │  weight?       │    │  by_vendor[]   │    │
//! │  └────────────────┘    │  total_cents   │    └────────────────┘    │
//! │                        └────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sale and its items live and die together: items are created with the
//! header, wholesale-replaced on update, and removed with the header on
//! delete. There is no per-item patching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale transaction (header only).
///
/// `total_cents` always equals the sum of the line items' totals; the
/// engine rejects writes where that does not hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Identifier assigned by the store on creation, immutable thereafter.
    pub id: i64,

    /// When the sale happened. Defaults to creation time if the caller
    /// doesn't supply one.
    pub date: DateTime<Utc>,

    /// Vendor who rang up the sale (nullable reference).
    pub vendor_id: Option<i64>,

    /// How the customer paid (nullable reference).
    pub payment_method_id: Option<i64>,

    /// Sale total in cents.
    pub total_cents: i64,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item within a sale.
///
/// `weight` carries the raw scale reading for produce sold by weight:
/// values of 50 and above are grams, below that kilograms. Unit-count
/// items have no weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    /// Article reference; loose produce may be sold without one.
    pub article_id: Option<i64>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub weight: Option<f64>,
    /// Line total in cents.
    pub total_cents: i64,
}

impl SaleItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A sale header together with its line items, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Sale Summary (listing view)
// =============================================================================

/// A sale header annotated with resolved display names for listings.
///
/// Missing references resolve to [`crate::NAME_PLACEHOLDER`], never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummary {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub vendor_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub total_cents: i64,
    pub vendor_name: String,
    pub payment_method_name: String,
}

// =============================================================================
// Write Models
// =============================================================================

/// Header fields for creating or updating a sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSale {
    /// Sale timestamp; `None` means "now" on create, "keep existing" on
    /// update.
    pub date: Option<DateTime<Utc>>,
    pub vendor_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub total_cents: i64,
}

/// A line item to persist with a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub article_id: Option<i64>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub weight: Option<f64>,
    pub total_cents: i64,
}

// =============================================================================
// Reporting
// =============================================================================

/// Aggregate over all sales whose date falls in an inclusive range.
///
/// Absent rows aggregate to zero, never null: an empty range yields an
/// all-zero report with no vendor entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Sum of all matched sale totals.
    pub total_cents: i64,
    /// Sum restricted to the well-known cash payment method.
    pub cash_cents: i64,
    /// Sum restricted to the well-known credit payment method.
    pub credit_cents: i64,
    /// Number of matched sales.
    pub count: i64,
    /// Per-vendor breakdown; vendors with no sales in range are omitted.
    pub by_vendor: Vec<VendorSales>,
}

/// One vendor's share of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VendorSales {
    pub name: String,
    pub count: i64,
    pub total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_total_as_money() {
        let sale = Sale {
            id: 1,
            date: Utc::now(),
            vendor_id: None,
            payment_method_id: None,
            total_cents: 15000,
        };
        assert_eq!(sale.total().to_string(), "$150.00");
    }

    #[test]
    fn test_types_serialize() {
        let item = NewSaleItem {
            article_id: Some(3),
            quantity: 2,
            unit_price_cents: 500,
            weight: None,
            total_cents: 1000,
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: NewSaleItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
