//! # Money Module
//!
//! Provides [`CurrencyFormat`], the only place where amounts are rounded.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AMOUNT PIPELINE                                                        │
//! │                                                                         │
//! │  LineItem (f64 qty/price/%)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  totals::calculate  ──► raw f64 sums, NO rounding                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CurrencyFormat::format ──► "Rp199.800"  ◄── rounding happens HERE      │
//! │                                                                         │
//! │  Keeping the sums unrounded means                                       │
//! │  grand == subtotal - discount + tax holds exactly.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use faktur_core::money::CurrencyFormat;
//!
//! let idr = CurrencyFormat::idr();
//! assert_eq!(idr.format(199_800.0), "Rp199.800");
//! assert_eq!(idr.format_deduction(20_000.0), "(Rp20.000)");
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Currency Format
// =============================================================================

/// Locale rules for rendering one currency.
///
/// The editor only ever uses [`CurrencyFormat::idr`]; the struct exists so
/// the grouping rules live in data rather than in string literals spread
/// through the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// ISO 4217 code, informational only.
    pub code: String,

    /// Prefix written directly before the digits.
    pub symbol: String,

    /// Thousands separator.
    pub group_separator: char,

    /// Separator between whole and fraction digits.
    pub decimal_separator: char,

    /// Number of fraction digits shown (values are rounded half away from zero).
    pub fraction_digits: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::idr()
    }
}

impl CurrencyFormat {
    /// Indonesian Rupiah with `id-ID` grouping and no fraction digits.
    pub fn idr() -> Self {
        CurrencyFormat {
            code: "IDR".to_string(),
            symbol: "Rp".to_string(),
            group_separator: '.',
            decimal_separator: ',',
            fraction_digits: 0,
        }
    }

    /// Formats an amount, e.g. `1234567.0` → `Rp1.234.567`.
    ///
    /// ## Edge Cases
    /// - Negative amounts get a leading `-` before the symbol
    /// - Amounts that round to zero never show a sign
    /// - `NaN` renders as `RpNaN`, infinities as `Rp∞` / `-Rp∞`
    ///
    /// ## Example
    /// ```rust
    /// use faktur_core::money::CurrencyFormat;
    ///
    /// let idr = CurrencyFormat::idr();
    /// assert_eq!(idr.format(0.0), "Rp0");
    /// assert_eq!(idr.format(-1500.0), "-Rp1.500");
    /// assert_eq!(idr.format(999.5), "Rp1.000");
    /// ```
    pub fn format(&self, amount: f64) -> String {
        if amount.is_nan() {
            return format!("{}NaN", self.symbol);
        }
        if amount.is_infinite() {
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{}{}∞", sign, self.symbol);
        }

        let digits = self.fraction_digits as usize;
        let scale = 10_f64.powi(digits as i32);
        let rounded = (amount.abs() * scale).round() / scale;

        let text = format!("{:.*}", digits, rounded);
        let (whole, fraction) = match text.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + whole.len() / 3 + 4);
        if amount < 0.0 && rounded != 0.0 {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_digits(whole, self.group_separator));
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Formats an amount that is subtracted on the document: `(Rp20.000)`.
    pub fn format_deduction(&self, amount: f64) -> String {
        format!("({})", self.format(amount))
    }
}

/// Inserts `separator` every three digits from the right.
fn group_digits(whole: &str, separator: char) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idr_grouping() {
        let idr = CurrencyFormat::idr();
        assert_eq!(idr.format(0.0), "Rp0");
        assert_eq!(idr.format(999.0), "Rp999");
        assert_eq!(idr.format(1000.0), "Rp1.000");
        assert_eq!(idr.format(199_800.0), "Rp199.800");
        assert_eq!(idr.format(1_234_567_890.0), "Rp1.234.567.890");
    }

    #[test]
    fn test_idr_rounds_half_away_from_zero() {
        let idr = CurrencyFormat::idr();
        assert_eq!(idr.format(2.5), "Rp3");
        assert_eq!(idr.format(2.49), "Rp2");
        assert_eq!(idr.format(-2.5), "-Rp3");
    }

    #[test]
    fn test_negative_and_negative_zero() {
        let idr = CurrencyFormat::idr();
        assert_eq!(idr.format(-20_000.0), "-Rp20.000");
        assert_eq!(idr.format(-0.0), "Rp0");
        assert_eq!(idr.format(-0.2), "Rp0");
    }

    #[test]
    fn test_deduction_is_parenthesized() {
        let idr = CurrencyFormat::idr();
        assert_eq!(idr.format_deduction(20_000.0), "(Rp20.000)");
        assert_eq!(idr.format_deduction(0.0), "(Rp0)");
    }

    #[test]
    fn test_non_finite() {
        let idr = CurrencyFormat::idr();
        assert_eq!(idr.format(f64::NAN), "RpNaN");
        assert_eq!(idr.format(f64::INFINITY), "Rp∞");
        assert_eq!(idr.format(f64::NEG_INFINITY), "-Rp∞");
    }

    #[test]
    fn test_fraction_digits() {
        let fmt = CurrencyFormat {
            fraction_digits: 2,
            ..CurrencyFormat::idr()
        };
        assert_eq!(fmt.format(1234.5), "Rp1.234,50");
        assert_eq!(fmt.format(0.125), "Rp0,13");
    }
}
