//! # Validation Module
//!
//! Input coercion utilities for Faktur.
//!
//! The editor deliberately does no validation beyond numeric coercion:
//! whatever the user types is stored, and the arithmetic layer decides
//! what it is worth.
//!
//! ## Coercion Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Coercion Layers                                    │
//! │                                                                         │
//! │  Layer 1: Edit (ItemList::update)                                      │
//! │  └── parse_float(): "12abc" → 12, "abc" → NaN                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Totals (totals::calculate)                                   │
//! │  └── or_zero(): NaN → 0 before any arithmetic                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Formatter (money::CurrencyFormat)                            │
//! │  └── rounding happens only here                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use faktur_core::validation::{parse_float, or_zero, sanitize_file_stem};
//!
//! assert_eq!(parse_float("12.5kg"), 12.5);
//! assert!(parse_float("abc").is_nan());
//! assert_eq!(or_zero(parse_float("abc")), 0.0);
//! assert_eq!(sanitize_file_stem("INV/2026/001"), "INV_2026_001");
//! ```

/// File stem used when the invoice number sanitizes to nothing.
pub const FALLBACK_FILE_STEM: &str = "Invoice";

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parses the longest numeric prefix of `input`, like a browser's `parseFloat`.
///
/// ## Rules
/// - Leading whitespace is skipped
/// - Optional sign, digits, optional fraction, optional exponent
/// - `Infinity` (with optional sign) is accepted
/// - No numeric prefix at all yields `NaN`
///
/// ## Example
/// ```rust
/// use faktur_core::validation::parse_float;
///
/// assert_eq!(parse_float("  42"), 42.0);
/// assert_eq!(parse_float("-3.5e2x"), -350.0);
/// assert_eq!(parse_float(".5"), 0.5);
/// assert!(parse_float("").is_nan());
/// ```
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Coalesces an invalid number to zero.
///
/// Missing, `NaN` and zero all behave as `0` in totals arithmetic.
/// Infinite values pass through untouched.
#[inline]
pub fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

// =============================================================================
// String Helpers
// =============================================================================

/// Returns true when the value is empty after trimming whitespace.
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Turns an invoice number into a safe download file stem.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`. An empty invoice
/// number falls back to [`FALLBACK_FILE_STEM`].
///
/// ## Example
/// ```rust
/// use faktur_core::validation::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("INV/2026/001"), "INV_2026_001");
/// assert_eq!(sanitize_file_stem(""), "Invoice");
/// ```
pub fn sanitize_file_stem(invoice_no: &str) -> String {
    let stem: String = invoice_no
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
