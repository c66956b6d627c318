//! # cartman-core: Pure Cart Logic for Cartman
//!
//! This crate is the **heart** of Cartman. It owns the cart line items, the
//! mutation API, and the synchronous event bus that tells the UI when to
//! re-derive its views.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cartman Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (apps/storefront)              │   │
//! │  │    Add button ──► Mini-cart ──► Checkout view ──► Purge         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add / remove / update_all / clear      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cartman-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  manager  │  │  events   │  │   view    │  │   │
//! │  │   │  ItemId   │  │CartManager│  │ EventBus  │  │ CartView  │  │   │
//! │  │   │   Item    │  │           │  │ CartEvent │  │ formatter │  │   │
//! │  │   └───────────┘  └─────┬─────┘  └───────────┘  └───────────┘  │   │
//! │  │                        │ CartStore trait                        │   │
//! │  └────────────────────────┼────────────────────────────────────────┘   │
//! │                           ▼                                             │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             cartman-store (memory / JSON file)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item identity, field names, line items
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Coercion of raw JSON into ids, counts and prices
//! - [`events`] - Typed synchronous event bus
//! - [`store`] - The persistence contract
//! - [`manager`] - The cart manager
//! - [`view`] - View-data derivation for the mini-cart and checkout
//! - [`checkout`] - Checkout submission payload
//!
//! ## Example Usage
//!
//! ```rust
//! use cartman_core::{CartManager, CartStore, ItemId};
//! use serde_json::{json, Value};
//! use std::collections::HashMap;
//! use std::convert::Infallible;
//!
//! #[derive(Default)]
//! struct Scratch(HashMap<String, Value>);
//!
//! impl CartStore for Scratch {
//!     type Error = Infallible;
//!     fn get(&self, key: &str) -> Result<Option<Value>, Infallible> {
//!         Ok(self.0.get(key).cloned())
//!     }
//!     fn set(&mut self, key: &str, value: Value) -> Result<(), Infallible> {
//!         self.0.insert(key.to_string(), value);
//!         Ok(())
//!     }
//! }
//!
//! let mut cart = CartManager::new(Scratch::default());
//! cart.refresh_from_store().unwrap();
//! cart.add_value(&json!({"id": "sku1", "count": 2, "price": 9.99})).unwrap();
//!
//! let id = ItemId::new("sku1").unwrap();
//! assert_eq!(cart.get(&id).unwrap().count, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod events;
pub mod manager;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cartman_core::Money` instead of
// `use cartman_core::money::Money`

pub use checkout::CheckoutRequest;
pub use error::{CartError, CartResult, ValidationError};
pub use events::{CartEvent, CartEventKind, ListenerError, ListenerId};
pub use manager::CartManager;
pub use money::Money;
pub use store::CartStore;
pub use types::*;
pub use view::{CartView, LineView, MiniCartView, PlainPriceFormatter, PriceFormatter};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store key the cart list is persisted under unless configured otherwise.
pub const DEFAULT_STORE_KEY: &str = "cart";

/// Placeholder shown in place of a price that cannot be computed.
pub const PRICE_FALLBACK: &str = "XXX";
