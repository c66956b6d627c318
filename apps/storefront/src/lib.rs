//! # Cartman Storefront Library
//!
//! Wires configuration, the file store, the cart manager and the renderer
//! together. The `cartman` binary is a clap front-end over this crate.
//!
//! ## Module Organization
//! ```text
//! cartman_storefront/
//! ├── lib.rs          ◄─── You are here (startup helpers)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartSession (manager + renderer)
//! │   └── config.rs   ◄─── StorefrontConfig loading
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── checkout.rs ◄─── Checkout request commands
//! ├── renderer.rs     ◄─── cart-changed subscriber
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod renderer;
pub mod state;

use std::path::Path;

use cartman_store::{FileStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{CartSession, StorefrontConfig};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cartman_core=trace` - Trace the cart manager only
/// - Default: WARN, INFO for cartman crates
/// - `--verbose`: INFO, DEBUG for cartman crates
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,cartman=debug"
    } else {
        "warn,cartman=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration from defaults, `cartman.toml` and `CARTMAN_*`.
pub fn load_config(path: Option<&Path>) -> Result<StorefrontConfig, ApiError> {
    Ok(StorefrontConfig::load(path)?)
}

/// Resolves where the store document lives.
///
/// ## Resolution Order
/// 1. `store_override` (the `--store` flag)
/// 2. `storePath` from config / `CARTMAN_STORE_PATH`
/// 3. Platform data directory
pub fn store_config(
    config: &StorefrontConfig,
    store_override: Option<&Path>,
) -> Result<StoreConfig, ApiError> {
    let store = match store_override.or(config.store_path.as_deref()) {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::in_data_dir()?,
    };
    Ok(store.pretty(config.pretty_store))
}

/// Opens the file store and loads the cart.
pub fn open_session(
    config: &StorefrontConfig,
    store_override: Option<&Path>,
) -> Result<CartSession<FileStore>, ApiError> {
    let store_config = store_config(config, store_override)?;
    info!(path = ?store_config.path, "Opening cart store");
    let store = FileStore::open(store_config)?;
    CartSession::open(store, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_store_override_wins() {
        let config = StorefrontConfig {
            store_path: Some(PathBuf::from("/from/config.json")),
            pretty_store: true,
            ..StorefrontConfig::default()
        };

        let store = store_config(&config, Some(Path::new("/from/flag.json"))).unwrap();
        assert_eq!(store.path, PathBuf::from("/from/flag.json"));
        assert!(store.pretty);

        let store = store_config(&config, None).unwrap();
        assert_eq!(store.path, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn test_session_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cart.json");
        let config = StorefrontConfig::default();

        let mut session = open_session(&config, Some(path.as_path())).unwrap();
        commands::cart::add_product(&mut session, r#"{"id": "mug", "price": 2}"#, "3").unwrap();
        drop(session);

        let session = open_session(&config, Some(path.as_path())).unwrap();
        let views = session.views();
        assert_eq!(views.checkout.products[0].count, 3);
        assert_eq!(views.checkout.total, "6.00");
    }
}
