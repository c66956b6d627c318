//! # JSON File Store
//!
//! Durable `CartStore` keeping every key in one JSON object on disk.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set("cart", [...])                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read document ──► corrupt? ──► move aside to *.corrupt, start fresh    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  doc["cart"] = [...]                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write cart-store.json.<pid>.tmp, fsync ──► rename over the document    │
//! │                                (readers never see a half-written file) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document is re-read on every call, so two processes sharing the file
//! see each other's last completed write.

use cartman_core::CartStore;
use serde_json::{Map, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// A store persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    /// Opens (without reading) the store described by `config`.
    ///
    /// Creates the parent directory when `create_dirs` is set. A missing
    /// file is fine: it is created on the first write.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        if config.create_dirs {
            if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        info!(path = ?config.path, "Opened cart store");
        Ok(FileStore { config })
    }

    /// Path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn read_document(&self) -> StoreResult<Map<String, Value>> {
        let path = &self.config.path;
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(StoreError::corrupt(path, "expected a JSON object")),
            Err(e) => Err(StoreError::corrupt(path, e.to_string())),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> StoreResult<()> {
        let path = &self.config.path;
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };

        // Per-process temp name so concurrent writers never share one.
        let tmp = sibling(path, &format!("{}.tmp", std::process::id()));
        let mut file = fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        file.write_all(&bytes).map_err(|e| StoreError::io(&tmp, e))?;
        file.sync_all().map_err(|e| StoreError::io(&tmp, e))?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }
        Ok(())
    }

    /// Moves an unreadable document out of the way so writes can resume.
    fn quarantine(&self) -> StoreResult<PathBuf> {
        let aside = sibling(&self.config.path, "corrupt");
        fs::rename(&self.config.path, &aside).map_err(|e| StoreError::io(&aside, e))?;
        Ok(aside)
    }
}

impl CartStore for FileStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let mut document = self.read_document()?;
        Ok(document.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        let mut document = match self.read_document() {
            Ok(document) => document,
            Err(StoreError::Corrupt { path, reason }) => {
                let aside = self.quarantine()?;
                warn!(?path, ?aside, %reason, "Store file was corrupt, moved aside");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        document.insert(key.to_string(), value);
        self.write_document(&document)?;
        debug!(key, path = ?self.config.path, "Store key written");
        Ok(())
    }
}

/// `cart-store.json` → `cart-store.json.<suffix>`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
