//! # Store Contract
//!
//! The cart persists its item list under a single key of an external
//! key-value store. This module only defines the contract; backends live
//! in `cartman-store` so this crate stays free of I/O.
//!
//! ## Contract
//! - Synchronous `get` / `set`
//! - String keys, JSON values
//! - `get` of a key that was never written is `Ok(None)`, not an error

use serde_json::Value;

/// A persistent key-value mapping outliving the cart session.
pub trait CartStore {
    /// Backend-specific failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, Self::Error>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value) -> Result<(), Self::Error>;
}
