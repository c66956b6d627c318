//! # cartman-store: Persistence Layer for Cartman
//!
//! Concrete `CartStore` backends. The cart manager only knows the trait;
//! this crate decides where the bytes live.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cartman Data Flow                                │
//! │                                                                         │
//! │  storefront command (add / remove / update)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartManager (cartman-core) ── set("cart", [...]) ──┐                  │
//! │                                                      │                  │
//! │  ┌───────────────────────────────────────────────────▼─────────────┐   │
//! │  │                   cartman-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  FileStore    │    │  MemoryStore  │    │ StoreConfig  │  │   │
//! │  │   │  (file.rs)    │    │  (memory.rs)  │    │ (config.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ one JSON doc  │    │ HashMap       │    │ path, pretty │  │   │
//! │  │   │ atomic rename │    │ no disk       │    │ data dir     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/cartman/cart-store.json                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cartman_core::CartManager;
//! use cartman_store::{FileStore, StoreConfig};
//!
//! let store = FileStore::open(StoreConfig::in_data_dir()?)?;
//! let mut cart = CartManager::new(store);
//! cart.refresh_from_store()?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{StoreConfig, DEFAULT_STORE_FILE};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
