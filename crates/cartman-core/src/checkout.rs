//! # Checkout Payload
//!
//! What the storefront hands to the integrating application when the
//! shopper presses "Checkout".
//!
//! ## Trust Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser / client                │  Order service                       │
//! │                                  │                                      │
//! │  CheckoutRequest ───── POST ─────┼──► re-validate every price           │
//! │  • items (as persisted)          │    re-check count > 0                │
//! │  • advisory_total_cents          │    recompute the total               │
//! │                                  │                                      │
//! │  The client total is a hint for display and logging only.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::manager::CartManager;
use crate::store::CartStore;

/// A cart snapshot ready to be POSTed to the checkout URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Unique per submission; lets the server drop duplicate posts.
    pub request_id: Uuid,

    /// Where the payload should be sent.
    pub checkout_url: String,

    /// Items exactly as they are persisted (configured field names).
    pub items: Vec<Value>,

    /// Client-side total in cents. Never trust this server-side.
    pub advisory_total_cents: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl CheckoutRequest {
    /// Snapshots the current cart.
    pub fn from_cart<S: CartStore>(cart: &CartManager<S>, checkout_url: impl Into<String>) -> Self {
        CheckoutRequest {
            request_id: Uuid::new_v4(),
            checkout_url: checkout_url.into(),
            items: cart
                .contents()
                .iter()
                .map(|item| item.to_value(cart.fields()))
                .collect(),
            advisory_total_cents: cart.total_price().map(|total| total.cents()),
            created_at: Utc::now(),
        }
    }

    /// Number of lines in the snapshot.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::convert::Infallible;

    #[derive(Default)]
    struct Scratch(HashMap<String, Value>);

    impl CartStore for Scratch {
        type Error = Infallible;

        fn get(&self, key: &str) -> Result<Option<Value>, Infallible> {
            Ok(self.0.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: Value) -> Result<(), Infallible> {
            self.0.insert(key.to_string(), value);
            Ok(())
        }
    }

    #[test]
    fn test_checkout_request_snapshot() {
        let mut cart = CartManager::new(Scratch::default());
        cart.refresh_from_store().unwrap();
        cart.add_value(&json!({"id": "sku1", "count": 2, "price": 9.99, "name": "Mug"}))
            .unwrap();

        let request = CheckoutRequest::from_cart(&cart, "https://shop.example/checkout");

        assert_eq!(request.line_count(), 1);
        assert_eq!(request.items[0]["name"], "Mug");
        assert_eq!(request.advisory_total_cents, Some(1998));

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["checkoutUrl"], "https://shop.example/checkout");
        assert_eq!(wire["advisoryTotalCents"], 1998);
        assert!(wire["requestId"].is_string());
    }

    #[test]
    fn test_unpriced_cart_has_no_advisory_total() {
        let mut cart = CartManager::new(Scratch::default());
        cart.add_value(&json!({"id": "a", "count": 1})).unwrap();

        let request = CheckoutRequest::from_cart(&cart, "/checkout");
        assert_eq!(request.advisory_total_cents, None);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let cart = CartManager::new(Scratch::default());
        let a = CheckoutRequest::from_cart(&cart, "/checkout");
        let b = CheckoutRequest::from_cart(&cart, "/checkout");
        assert_ne!(a.request_id, b.request_id);
    }
}
