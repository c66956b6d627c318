//! # State Module
//!
//! Startup state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │   StorefrontConfig           │  │   CartSession<S>             │    │
//! │  │                              │  │                              │    │
//! │  │  store key, field names      │─►│  CartManager<S>              │    │
//! │  │  checkout URL, fallback      │  │  Renderer (cart-changed)     │    │
//! │  │  store path                  │  │                              │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! │                                                                         │
//! │  Config is read-only after load. The session is owned by the command  │
//! │  being run; there is one manager per store key per process.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartSession;
pub use config::{ConfigError, StorefrontConfig, CONFIG_FILE};
