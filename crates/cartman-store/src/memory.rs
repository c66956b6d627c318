//! # Memory Store
//!
//! Non-durable `CartStore` for tests, demos and private-browsing style
//! sessions where nothing may touch disk.

use cartman_core::CartStore;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;

/// A `HashMap`-backed store. Contents vanish with the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one key (builder style).
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Borrows the value under `key` without cloning.
    pub fn peek(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if no key has been written.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CartStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<Value>, Infallible> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), Infallible> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
