//! # Receipt Rendering
//!
//! Fixed-width text rendering of a sale's line items for thermal printing.
//!
//! ## Ticket Layout
//! ```text
//! ┌────────────────────────────┐
//! │ VERDULERIA                 │  ← header line (store name)
//! │ 05/01/2024 14:30           │  ← timestamp, interpolated once
//! │                            │
//! │ BANANA       70g     $35.50│  ← name(12) weight(6) price(8)
//! │ TOMATE       0.80kg  $12.00│
//! │                            │
//! │ TOTAL:              $47.50 │  ← sum of item prices, right-aligned
//! │                            │
//! │ GRACIAS POR SU COMPRA      │
//! └────────────────────────────┘
//! ```
//!
//! Rendering is a pure function: same lines, header and timestamp produce
//! byte-identical output. The clock is an *input*, never read here.
//!
//! ## Name normalization
//! Thermal printers in the field choke on anything beyond plain ASCII, so
//! item names are upper-cased, NFD-decomposed to strip diacritics, and
//! reduced to `[A-Z0-9 ]`. Names longer than the column are truncated to
//! its width.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::money::Money;

// =============================================================================
// Column Layout
// =============================================================================

/// Width of the item name column (left-aligned, truncating).
pub const NAME_WIDTH: usize = 12;

/// Width of the weight column (left-aligned).
pub const WEIGHT_WIDTH: usize = 6;

/// Width of the price column (right-aligned).
pub const PRICE_WIDTH: usize = 8;

/// Placeholder in the weight column for items sold by unit.
const NO_WEIGHT: &str = "-";

/// Scale readings at or above this are grams; below it, kilograms.
/// Nobody weighs 50 kg of lettuce and nobody prices 0.05 g of it.
const GRAMS_THRESHOLD: f64 = 50.0;

// =============================================================================
// Receipt Line
// =============================================================================

/// One printable line item: display name, price charged and the optional
/// raw scale reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub price: Money,
    pub weight: Option<f64>,
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a full receipt: header line, timestamp, one fixed-width row per
/// item, and a total line summing the item prices.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use verdu_core::money::Money;
/// use verdu_core::receipt::{render, ReceiptLine};
///
/// let lines = vec![ReceiptLine {
///     name: "Banana".to_string(),
///     price: Money::from_cents(3550),
///     weight: Some(70.0),
/// }];
/// let at = Utc.with_ymd_and_hms(2024, 1, 5, 14, 30, 0).unwrap();
/// let text = render(&lines, "VERDULERIA", at);
/// assert!(text.starts_with("VERDULERIA\n05/01/2024 14:30\n\n"));
/// ```
pub fn render(lines: &[ReceiptLine], header_line: &str, timestamp: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(header_line);
    out.push('\n');
    out.push_str(&timestamp.format("%d/%m/%Y %H:%M").to_string());
    out.push_str("\n\n");

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_line(line));
    }

    let total: Money = lines.iter().map(|line| line.price).sum();
    out.push_str("\n\n");
    out.push_str(&format!(
        "{:<left$} {:>price$}",
        "TOTAL:",
        total.to_string(),
        left = NAME_WIDTH + 1 + WEIGHT_WIDTH,
        price = PRICE_WIDTH,
    ));
    out.push_str("\n\nGRACIAS POR SU COMPRA\n\n\n");

    out
}

/// Formats one item row: `name(12) weight(6) price(8)`.
fn format_line(line: &ReceiptLine) -> String {
    let name: String = normalize_name(&line.name)
        .chars()
        .take(NAME_WIDTH)
        .collect();

    format!(
        "{:<name_w$} {:<weight_w$} {:>price_w$}",
        name,
        format_weight(line.weight),
        line.price.to_string(),
        name_w = NAME_WIDTH,
        weight_w = WEIGHT_WIDTH,
        price_w = PRICE_WIDTH,
    )
}

/// Upper-cases, strips diacritics (NFD decompose, drop the combining
/// marks) and removes every character outside `[A-Z0-9 ]`.
fn normalize_name(name: &str) -> String {
    name.to_uppercase()
        .nfd()
        .filter(|c| matches!(c, 'A'..='Z' | '0'..='9' | ' '))
        .collect()
}

/// Formats the weight column.
///
/// Readings at or above [`GRAMS_THRESHOLD`] display as whole grams,
/// smaller ones as kilograms with two decimals; unit items get a dash.
fn format_weight(weight: Option<f64>) -> String {
    match weight {
        Some(w) if w >= GRAMS_THRESHOLD => format!("{w:.0}g"),
        Some(w) => format!("{w:.2}kg"),
        None => NO_WEIGHT.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
