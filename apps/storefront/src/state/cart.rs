//! # Cart Session
//!
//! One cart manager wired to its store and renderer.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartSession::open(store, &config)                                      │
//! │       │                                                                 │
//! │       ├── CartManager::new(store)                                       │
//! │       │       .with_store_key(config.store_key)                         │
//! │       │       .with_fields(config.fields)                               │
//! │       │                                                                 │
//! │       ├── Renderer::attach   (subscribes before the first event)       │
//! │       │                                                                 │
//! │       └── refresh_from_store ──► cart-initialized, cart-changed         │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                              views rendered from persisted contents    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cartman_core::{CartManager, CartStore, PlainPriceFormatter};
use tracing::info;

use crate::error::ApiError;
use crate::renderer::{RenderedViews, Renderer};
use crate::state::StorefrontConfig;

/// A live cart plus the views that follow it.
#[derive(Debug)]
pub struct CartSession<S: CartStore> {
    cart: CartManager<S>,
    renderer: Renderer,
}

impl<S: CartStore> CartSession<S> {
    /// Builds the manager, attaches the renderer and loads the persisted cart.
    ///
    /// ## Errors
    /// Only a failing listener during the initial load. A missing or
    /// unreadable store loads as an empty cart.
    pub fn open(store: S, config: &StorefrontConfig) -> Result<Self, ApiError> {
        let mut cart = CartManager::new(store)
            .with_store_key(config.store_key.clone())
            .with_fields(config.fields.clone());

        let formatter = PlainPriceFormatter::with_fallback(config.price_fallback.clone());
        let renderer = Renderer::attach(&mut cart, formatter);

        cart.refresh_from_store()?;
        info!(lines = cart.len(), key = %config.store_key, "Cart session opened");

        Ok(CartSession { cart, renderer })
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &CartManager<S> {
        &self.cart
    }

    /// Write access to the cart. Changes re-render the views.
    pub fn cart_mut(&mut self) -> &mut CartManager<S> {
        &mut self.cart
    }

    /// Current views.
    pub fn views(&self) -> RenderedViews {
        self.renderer.snapshot()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Releases the store.
    pub fn into_store(self) -> S {
        self.cart.into_store()
    }
}
