//! # Money Module
//!
//! Provides the `Money` type for handling unit prices and totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Product payloads carry prices as JSON numbers:                        │
//! │    {"price": 9.99}  →  as f64: 9.9900000000000002131628...             │
//! │    9.99 × 3 = 29.970000000000002  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Parse the decimal TEXT into integer cents                │
//! │    "9.99" → 999 cents, 999 × 3 = 2997 cents → "29.97"                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartman_core::money::Money;
//!
//! let price = Money::parse_decimal("9.99").unwrap();
//! assert_eq!(price.cents(), 999);
//!
//! let line = price.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line.to_string(), "19.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals over negative counts stay representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Two decimals**: the cart never shows more precision than cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cartman_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal string such as `"9.99"`, `"10"` or `"-0.5"`.
    ///
    /// ## Rules
    /// - Optional leading sign, digits, optional fraction
    /// - Digits past the cents must be zeros (`"1.500"` is fine, `"0.333"` is not)
    /// - Exponent notation, empty strings and stray characters are rejected
    ///
    /// ## Example
    /// ```rust
    /// use cartman_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10").unwrap().cents(), 1000);
    /// assert_eq!(Money::parse_decimal(" 1.250 ").unwrap().cents(), 125);
    /// assert!(Money::parse_decimal("0.125").is_none());
    /// assert!(Money::parse_decimal("1e3").is_none());
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Money> {
        let text = text.trim();
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let major: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let digits = fraction.as_bytes();
        if digits.iter().skip(2).any(|&b| b != b'0') {
            return None;
        }
        let digit = |i: usize| digits.get(i).map_or(0, |b| i64::from(b - b'0'));
        let minor = digit(0) * 10 + digit(1);

        let cents = major.checked_mul(100)?.checked_add(minor)?;
        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a line count.
    ///
    /// Returns `None` on overflow so callers can show the price fallback
    /// instead of a wrapped number.
    ///
    /// ## Example
    /// ```rust
    /// use cartman_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_multiply_quantity(3).unwrap().cents(), 897);
    /// assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Converts to a JSON number with two-decimal precision (`999` → `9.99`).
    ///
    /// Used when an item is written back to the store; [`Money::parse_decimal`]
    /// reads the shortest round-trip text back to the same cents.
    pub fn to_json_number(&self) -> serde_json::Value {
        serde_json::Value::from(self.0 as f64 / 100.0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol (`"10.99"`, `"-5.50"`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
