//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and categorization      │
//! │       │                                                                 │
//! │       ├──► CartManager: logged, cart loads empty / mutation stands     │
//! │       │                                                                 │
//! │       └──► ApiError (storefront) when opening the store fails          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    ///
    /// ## When This Occurs
    /// - Directory cannot be created (permissions)
    /// - Disk full while writing
    /// - File replaced by a directory
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but does not hold a JSON object.
    ///
    /// ## When This Occurs
    /// - Truncated write from an older version without atomic replace
    /// - File edited by hand
    #[error("Store file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// A value could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No platform data directory could be determined.
    #[error("Could not determine a data directory for the store")]
    NoDataDir,
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a Corrupt error.
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
