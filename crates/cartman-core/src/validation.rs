//! # Validation Module
//!
//! Coercion of raw JSON payload values into typed cart fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Raw Values Come From                         │
//! │                                                                         │
//! │  Product payload (data-product JSON)                                   │
//! │  ├── id:    "sku1" | 42                                                │
//! │  ├── count: 2 | "2" | 2.0                                              │
//! │  └── price: 9.99 | "9.99"                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: canonical ids, whole counts, cent prices                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Checkout form (text inputs)                                           │
//! │  └── count: " 3 " | "" | "abc"                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{Number, Value};

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numbers
// =============================================================================

/// Canonical decimal text of a JSON number.
///
/// Integral values print without a fraction so `1` and `1.0` agree.
pub fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Parses a count from a JSON number or numeric text.
///
/// ## Rules
/// - JSON integers are taken as-is
/// - Floats and text must have a zero fraction (`2.0`, `"2"`, `" 2.00 "`)
/// - Anything else (fractions, words, booleans, null) is not a count
///
/// ## Example
/// ```rust
/// use cartman_core::validation::parse_count;
/// use serde_json::json;
///
/// assert_eq!(parse_count(&json!(3)), Some(3));
/// assert_eq!(parse_count(&json!("3")), Some(3));
/// assert_eq!(parse_count(&json!(-1)), Some(-1));
/// assert_eq!(parse_count(&json!(2.5)), None);
/// assert_eq!(parse_count(&json!("three")), None);
/// ```
pub fn parse_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => parse_count_text(s),
        _ => None,
    }
}

/// Parses count text strictly: trimmed, whole, numeric.
pub fn parse_count_text(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(i);
    }
    // Only plain decimals; "inf", "NaN" and exponents are not counts.
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
    {
        return None;
    }
    text.parse::<f64>().ok().and_then(whole_number)
}

/// Parses the count typed into an "add to cart" box.
///
/// Mirrors what a shopper expects from a quantity input: unreadable input
/// counts as zero and a leading number is honoured (`"2 pcs"` → 2).
pub fn parse_requested_count(text: &str) -> i64 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().unwrap_or(0)
}

fn whole_number(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        Some(f as i64)
    } else {
        None
    }
}

// =============================================================================
// Prices
// =============================================================================

/// Parses a unit price from a JSON number or numeric text.
///
/// Returns `None` for anything that is not a whole number of cents; the UI
/// shows the price fallback for such lines.
pub fn parse_price(value: &Value) -> Option<Money> {
    match value {
        Value::Number(n) => Money::parse_decimal(&n.to_string()).or_else(|| {
            // Exponent form ("1e-7", "1e21") from very small or large floats.
            let cents = n.as_f64()? * 100.0;
            if cents.is_finite() && cents.fract() == 0.0 && cents.abs() < 9.0e15 {
                Some(Money::from_cents(cents as i64))
            } else {
                None
            }
        }),
        Value::String(s) => Money::parse_decimal(s),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
