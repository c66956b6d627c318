//! # Store Configuration
//!
//! Where and how the JSON file store writes its document.
//!
//! ## Default Location
//! - **Linux**: `~/.local/share/cartman/cart-store.json`
//! - **macOS**: `~/Library/Application Support/org.cartman.cartman/cart-store.json`
//! - **Windows**: `%APPDATA%\cartman\cartman\data\cart-store.json`

use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// File name used inside the platform data directory.
pub const DEFAULT_STORE_FILE: &str = "cart-store.json";

/// File store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/var/lib/shop/cart-store.json")
///     .pretty(true)
///     .create_dirs(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the JSON document.
    pub path: PathBuf,

    /// Indent the document on write.
    /// Default: false
    pub pretty: bool,

    /// Create missing parent directories on open.
    /// Default: true
    pub create_dirs: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            pretty: false,
            create_dirs: true,
        }
    }

    /// Uses the platform data directory.
    pub fn in_data_dir() -> StoreResult<Self> {
        let dirs = directories::ProjectDirs::from("org", "cartman", "cartman")
            .ok_or(StoreError::NoDataDir)?;
        Ok(StoreConfig::new(dirs.data_dir().join(DEFAULT_STORE_FILE)))
    }

    /// Sets whether the document is pretty-printed.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets whether missing parent directories are created.
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("/tmp/x.json").pretty(true).create_dirs(false);
        assert_eq!(config.path, PathBuf::from("/tmp/x.json"));
        assert!(config.pretty);
        assert!(!config.create_dirs);
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new("cart.json");
        assert!(!config.pretty);
        assert!(config.create_dirs);
    }
}
