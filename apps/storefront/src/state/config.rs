//! # Storefront Configuration
//!
//! Loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources (Applied In Order)
//! 1. Defaults (this file)
//! 2. Config file (`cartman.toml`, or `--config <path>`)
//! 3. Environment variables (`CARTMAN_*`)
//! 4. Validation
//!
//! ## Example `cartman.toml`
//! ```toml
//! storeKey = "cart"
//! checkoutUrl = "https://shop.example/checkout"
//! priceFallback = "n/a"
//!
//! [fields]
//! id = "sku"
//! count = "qty"
//! ```

use std::path::{Path, PathBuf};

use cartman_core::{FieldNames, DEFAULT_STORE_KEY, PRICE_FALLBACK};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the config file looked up in the platform config directory.
pub const CONFIG_FILE: &str = "cartman.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {field} {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: &str) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorefrontConfig {
    /// Key the cart is persisted under.
    /// Default: "cart"
    pub store_key: String,

    /// Keys carrying id / count / price in item objects.
    pub fields: FieldNames,

    /// Where checkout requests are addressed.
    pub checkout_url: String,

    /// Shown instead of a price that cannot be computed.
    /// Default: "XXX"
    pub price_fallback: String,

    /// Store document path. `None` uses the platform data directory.
    pub store_path: Option<PathBuf>,

    /// Pretty-print the store document.
    pub pretty_store: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_key: DEFAULT_STORE_KEY.to_string(),
            fields: FieldNames::default(),
            checkout_url: "/checkout".to_string(),
            price_fallback: PRICE_FALLBACK.to_string(),
            store_path: None,
            pretty_store: false,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from all sources.
    ///
    /// An explicit `path` must exist. Without one, `cartman.toml` in the
    /// platform config directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        let mut config = match file {
            Some(file) => Self::from_file(&file)?,
            None => {
                debug!("No config file, using defaults");
                StorefrontConfig::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(?path, "Loaded config file");
        Ok(config)
    }

    /// Applies `CARTMAN_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `CARTMAN_STORE_KEY`
    /// - `CARTMAN_STORE_PATH`
    /// - `CARTMAN_CHECKOUT_URL`
    /// - `CARTMAN_PRICE_FALLBACK`
    /// - `CARTMAN_ID_FIELD`, `CARTMAN_COUNT_FIELD`, `CARTMAN_PRICE_FIELD`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("CARTMAN_STORE_KEY") {
            self.store_key = key;
        }
        if let Some(path) = lookup("CARTMAN_STORE_PATH") {
            self.store_path = Some(PathBuf::from(path));
        }
        if let Some(url) = lookup("CARTMAN_CHECKOUT_URL") {
            self.checkout_url = url;
        }
        if let Some(fallback) = lookup("CARTMAN_PRICE_FALLBACK") {
            self.price_fallback = fallback;
        }
        if let Some(id) = lookup("CARTMAN_ID_FIELD") {
            self.fields.id = id;
        }
        if let Some(count) = lookup("CARTMAN_COUNT_FIELD") {
            self.fields.count = count;
        }
        if let Some(price) = lookup("CARTMAN_PRICE_FIELD") {
            self.fields.price = price;
        }
    }

    /// Checks the configuration is usable.
    ///
    /// ## Rules
    /// - Store key, checkout URL and every field name are non-blank
    /// - The three field names are distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storeKey", &self.store_key),
            ("checkoutUrl", &self.checkout_url),
            ("fields.id", &self.fields.id),
            ("fields.count", &self.fields.count),
            ("fields.price", &self.fields.price),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }

        let FieldNames { id, count, price } = &self.fields;
        if id == count || id == price || count == price {
            return Err(ConfigError::invalid("fields", "must name three different keys"));
        }

        Ok(())
    }
}

/// `cartman.toml` inside the platform config directory.
fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "cartman", "cartman")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
