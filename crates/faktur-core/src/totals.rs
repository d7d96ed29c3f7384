//! # Totals Calculator
//!
//! Pure arithmetic over the item list.
//!
//! ## Per-Row Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base       = qty × price                                               │
//! │  discount   = base × disc / 100                                         │
//! │  afterDisc  = base − discount                                           │
//! │  tax        = afterDisc × tax / 100      (tax applies AFTER discount)   │
//! │  rowTotal   = afterDisc + tax                                           │
//! │                                                                         │
//! │  NaN inputs count as 0 before any of the above.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Totals
//! `grand = subtotal − totalDisc + totalTax`. Nothing is rounded here;
//! rounding belongs to [`crate::money::CurrencyFormat`].
//!
//! ## Example
//! ```rust
//! use faktur_core::items::ItemList;
//! use faktur_core::totals::calculate;
//! use faktur_core::types::ItemField;
//!
//! let mut items = ItemList::new();
//! items.update(0, ItemField::Qty, "2");
//! items.update(0, ItemField::Price, "100000");
//! items.update(0, ItemField::Disc, "10");
//! items.update(0, ItemField::Tax, "11");
//!
//! let totals = calculate(items.as_slice());
//! assert_eq!(totals.subtotal, 200_000.0);
//! assert_eq!(totals.total_discount, 20_000.0);
//! assert_eq!(totals.total_tax, 19_800.0);
//! assert_eq!(totals.grand_total, 199_800.0);
//! ```

use serde::Serialize;

use crate::types::LineItem;
use crate::validation::or_zero;

// =============================================================================
// Line Amounts
// =============================================================================

/// Computed amounts for one row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAmounts {
    pub base: f64,
    pub discount: f64,
    pub after_discount: f64,
    pub tax: f64,
    /// What the row's total cell shows: `after_discount + tax`.
    pub total: f64,
}

impl LineAmounts {
    pub fn of(item: &LineItem) -> Self {
        let qty = or_zero(item.qty);
        let price = or_zero(item.price);
        let disc = or_zero(item.disc);
        let tax_rate = or_zero(item.tax);

        let base = qty * price;
        let discount = base * disc / 100.0;
        let after_discount = base - discount;
        let tax = after_discount * tax_rate / 100.0;

        LineAmounts {
            base,
            discount,
            after_discount,
            tax,
            total: after_discount + tax,
        }
    }
}

// =============================================================================
// Document Totals
// =============================================================================

/// Sums over every row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    pub total_discount: f64,
    pub total_tax: f64,
    pub grand_total: f64,
}

/// Computes the document totals.
pub fn calculate(items: &[LineItem]) -> Totals {
    let mut totals = Totals::default();

    for amounts in items.iter().map(LineAmounts::of) {
        totals.subtotal += amounts.base;
        totals.total_discount += amounts.discount;
        totals.total_tax += amounts.tax;
    }

    totals.grand_total = totals.subtotal - totals.total_discount + totals.total_tax;
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================
