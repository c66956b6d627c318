//! # View-Data
//!
//! Presentational data the UI re-derives on every `cart-changed` event.
//!
//! ## What Gets Rendered
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mini-cart                         Checkout                            │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │ 2 items   total 29.97    │      │ Mug      x2   9.99    19.98  │    │
//! │  │ [Checkout]               │      │ Plate    x1   9.99     9.99  │    │
//! │  └──────────────────────────┘      │ ───────────────────────────  │    │
//! │   MiniCartView                     │ Total               29.97    │    │
//! │                                    └──────────────────────────────┘    │
//! │                                     CartView + LineView                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices go through a [`PriceFormatter`]. The default prints two decimals
//! and falls back to a sentinel when a value cannot be computed, so one bad
//! product payload never breaks the whole cart view.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Item;
use crate::PRICE_FALLBACK;

// =============================================================================
// Price Formatting
// =============================================================================

/// Turns an amount into display text.
///
/// `None` means the amount could not be computed (missing price, overflow).
pub trait PriceFormatter {
    fn format(&self, amount: Option<Money>) -> String;
}

/// Any `Fn(Option<Money>) -> String` is a formatter.
impl<F> PriceFormatter for F
where
    F: Fn(Option<Money>) -> String,
{
    fn format(&self, amount: Option<Money>) -> String {
        self(amount)
    }
}

/// Two decimals, no currency symbol, sentinel on unknown amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainPriceFormatter {
    fallback: String,
}

impl PlainPriceFormatter {
    /// Creates a formatter with a custom fallback sentinel.
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        PlainPriceFormatter {
            fallback: fallback.into(),
        }
    }
}

impl Default for PlainPriceFormatter {
    fn default() -> Self {
        PlainPriceFormatter::with_fallback(PRICE_FALLBACK)
    }
}

impl PriceFormatter for PlainPriceFormatter {
    fn format(&self, amount: Option<Money>) -> String {
        match amount {
            Some(money) => money.to_string(),
            None => self.fallback.clone(),
        }
    }
}

// =============================================================================
// Derived Values
// =============================================================================

/// Σ count × price over all lines.
///
/// `None` as soon as one line has no price or the sum overflows.
pub fn total_price(items: &[Item]) -> Option<Money> {
    items
        .iter()
        .try_fold(Money::zero(), |total, item| total.checked_add(item.line_total()?))
}

/// Number of lines (not the sum of counts).
pub fn item_count(items: &[Item]) -> usize {
    items.len()
}

// =============================================================================
// View Types
// =============================================================================

/// One checkout line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineView {
    pub id: String,
    pub count: i64,
    /// Formatted unit price.
    pub price: String,
    /// Formatted count × price.
    pub total: String,
    pub name: Option<String>,
    pub url: Option<String>,
    /// Only present when the product payload had an image.
    pub img: Option<String>,
}

impl LineView {
    pub fn from_item(item: &Item, formatter: &dyn PriceFormatter) -> Self {
        LineView {
            id: item.id.to_string(),
            count: item.count,
            price: formatter.format(item.price),
            total: formatter.format(item.line_total()),
            name: item.text_field("name").map(str::to_string),
            url: item.text_field("url").map(str::to_string),
            img: item
                .text_field("img")
                .filter(|src| !src.is_empty())
                .map(str::to_string),
        }
    }
}

/// Which checkout template the UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutTemplate {
    Populated,
    Empty,
}

/// Data behind the checkout view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    /// Number of lines.
    pub count: usize,
    /// Formatted grand total.
    pub total: String,
    pub products: Vec<LineView>,
    pub template: CheckoutTemplate,
}

impl CartView {
    pub fn derive(items: &[Item], formatter: &dyn PriceFormatter) -> Self {
        let count = item_count(items);
        CartView {
            count,
            total: formatter.format(total_price(items)),
            products: items
                .iter()
                .map(|item| LineView::from_item(item, formatter))
                .collect(),
            template: if count > 0 {
                CheckoutTemplate::Populated
            } else {
                CheckoutTemplate::Empty
            },
        }
    }
}

/// The "filled" part of the mini-cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MiniCartFilled {
    pub count: usize,
    pub total: String,
}

/// Data behind the mini-cart.
///
/// Exactly one of `empty` / `filled` is shown: the empty-cart message when
/// there are no lines, the count/total/checkout controls otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MiniCartView {
    pub empty: bool,
    pub filled: Option<MiniCartFilled>,
}

impl MiniCartView {
    pub fn derive(items: &[Item], formatter: &dyn PriceFormatter) -> Self {
        let count = item_count(items);
        if count == 0 {
            return MiniCartView {
                empty: true,
                filled: None,
            };
        }
        MiniCartView {
            empty: false,
            filled: Some(MiniCartFilled {
                count,
                total: formatter.format(total_price(items)),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    fn line(id: &str, count: i64, cents: Option<i64>) -> Item {
        Item::new(ItemId::new(id).unwrap(), count, cents.map(Money::from_cents))
    }

    #[test]
    fn test_total_price() {
        let items = vec![line("a", 2, Some(999)), line("b", 1, Some(1000))];
        assert_eq!(total_price(&items), Some(Money::from_cents(2998)));
        assert_eq!(total_price(&[]), Some(Money::zero()));
    }

    #[test]
    fn test_total_price_unknown_when_a_price_is_missing() {
        let items = vec![line("a", 2, Some(999)), line("b", 1, None)];
        assert_eq!(total_price(&items), None);
    }

    #[test]
    fn test_total_price_unknown_on_overflow() {
        let items = vec![line("a", 2, Some(i64::MAX / 2)), line("b", 1, Some(i64::MAX))];
        assert_eq!(total_price(&items), None);
    }

    #[test]
    fn test_plain_formatter() {
        let formatter = PlainPriceFormatter::default();
        assert_eq!(formatter.format(Some(Money::from_cents(1998))), "19.98");
        assert_eq!(formatter.format(Some(Money::from_cents(5))), "0.05");
        assert_eq!(formatter.format(None), "XXX");

        let dashes = PlainPriceFormatter::with_fallback("--");
        assert_eq!(dashes.format(None), "--");
    }

    #[test]
    fn test_closure_formatter() {
        let euros = |amount: Option<Money>| match amount {
            Some(m) => format!("{} €", m),
            None => "n/a".to_string(),
        };
        let items = vec![line("a", 3, Some(250))];
        let view = CartView::derive(&items, &euros);

        assert_eq!(view.total, "7.50 €");
        assert_eq!(view.products[0].price, "2.50 €");
    }

    #[test]
    fn test_cart_view() {
        let items = vec![
            line("a", 2, Some(999))
                .with_field("name", "Mug")
                .with_field("url", "/mug")
                .with_field("img", ""),
            line("b", 1, None).with_field("img", "/plate.png"),
        ];
        let view = CartView::derive(&items, &PlainPriceFormatter::default());

        assert_eq!(view.count, 2);
        assert_eq!(view.total, "XXX");
        assert_eq!(view.template, CheckoutTemplate::Populated);

        let mug = &view.products[0];
        assert_eq!(mug.price, "9.99");
        assert_eq!(mug.total, "19.98");
        assert_eq!(mug.name.as_deref(), Some("Mug"));
        assert_eq!(mug.img, None);

        let plate = &view.products[1];
        assert_eq!(plate.price, "XXX");
        assert_eq!(plate.total, "XXX");
        assert_eq!(plate.img.as_deref(), Some("/plate.png"));
    }

    #[test]
    fn test_empty_cart_views() {
        let formatter = PlainPriceFormatter::default();

        let view = CartView::derive(&[], &formatter);
        assert_eq!(view.template, CheckoutTemplate::Empty);
        assert_eq!(view.total, "0.00");

        let mini = MiniCartView::derive(&[], &formatter);
        assert!(mini.empty);
        assert!(mini.filled.is_none());
    }

    #[test]
    fn test_mini_cart_filled() {
        let items = vec![line("a", 2, Some(999)), line("b", 3, Some(1000))];
        let mini = MiniCartView::derive(&items, &PlainPriceFormatter::default());

        assert!(!mini.empty);
        assert_eq!(
            mini.filled,
            Some(MiniCartFilled {
                count: 2,
                total: "49.98".to_string()
            })
        );
    }
}
