//! # Checkout Commands
//!
//! Turns the cart into a [`CheckoutRequest`] for the order service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Checkout" pressed                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart empty? ── yes ──► CART_EMPTY                                      │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  CheckoutRequest::from_cart (request id, items, advisory total)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  purge? ── yes ──► clear cart (cart-cleared, cart-changed)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutResponse { request, views }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cartman_core::{CartStore, CheckoutRequest};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ErrorCode};
use crate::renderer::RenderedViews;
use crate::state::{CartSession, StorefrontConfig};

/// Result of a checkout submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub request: CheckoutRequest,
    /// Views after the optional purge.
    pub views: RenderedViews,
}

/// Snapshots the cart for checkout, optionally emptying it afterwards.
///
/// ## Errors
/// `CART_EMPTY` when there is nothing to check out.
pub fn checkout<S: CartStore>(
    session: &mut CartSession<S>,
    config: &StorefrontConfig,
    purge: bool,
) -> Result<CheckoutResponse, ApiError> {
    if session.cart().is_empty() {
        return Err(ApiError::new(ErrorCode::CartEmpty, "Cart is empty"));
    }

    let request = CheckoutRequest::from_cart(session.cart(), config.checkout_url.as_str());
    info!(
        request_id = %request.request_id,
        lines = request.line_count(),
        advisory_total_cents = ?request.advisory_total_cents,
        "Checkout request built"
    );

    if purge {
        session.cart_mut().clear()?;
        info!(request_id = %request.request_id, "Cart purged after checkout");
    }

    Ok(CheckoutResponse {
        request,
        views: session.views(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_product;
    use cartman_store::MemoryStore;

    fn session() -> CartSession<MemoryStore> {
        CartSession::open(MemoryStore::new(), &StorefrontConfig::default()).unwrap()
    }

    #[test]
    fn test_checkout_keeps_cart_by_default() {
        let mut session = session();
        add_product(&mut session, r#"{"id": "mug", "price": 9.99}"#, "2").unwrap();

        let response = checkout(&mut session, &StorefrontConfig::default(), false).unwrap();

        assert_eq!(response.request.checkout_url, "/checkout");
        assert_eq!(response.request.line_count(), 1);
        assert_eq!(response.request.advisory_total_cents, Some(1998));
        assert!(!response.views.mini_cart.empty);
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_checkout_with_purge_empties_cart() {
        let mut session = session();
        add_product(&mut session, r#"{"id": "mug", "price": 9.99}"#, "1").unwrap();

        let response = checkout(&mut session, &StorefrontConfig::default(), true).unwrap();

        assert_eq!(response.request.line_count(), 1);
        assert!(response.views.mini_cart.empty);
        assert!(session.cart().is_empty());
        assert_eq!(
            session.into_store().peek("cart"),
            Some(&serde_json::json!([]))
        );
    }

    #[test]
    fn test_checkout_refuses_empty_cart() {
        let mut session = session();
        let err = checkout(&mut session, &StorefrontConfig::default(), true).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartEmpty);
    }
}
