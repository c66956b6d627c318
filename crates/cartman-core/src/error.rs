//! # Error Types
//!
//! Domain-specific error types for cartman-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartman-core errors (this file)                                       │
//! │  ├── CartError        - Cart operation failures                        │
//! │  └── ValidationError  - Raw item data that cannot be coerced           │
//! │                                                                         │
//! │  cartman-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence failures (logged, never fatal)     │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, field name)
//! 3. Errors are enum variants, never String
//! 4. A failed operation leaves the cart untouched and emits no events

use thiserror::Error;

use crate::events::{CartEventKind, ListenerError};
use crate::types::ItemId;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The item handed to `add` (or a patch handed to `update_all`) is unusable.
    ///
    /// ## When This Occurs
    /// - Missing or empty id
    /// - Missing count, or a count that is not a whole number
    /// - The accumulated count overflows
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ValidationError),

    /// `update_all` referenced an id that is not in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout view shows sku1, sku2
    ///      │
    ///      ▼  (another tab clears the cart)
    /// "Update" pressed with {sku1: 3, sku2: 1}
    ///      │
    ///      ▼
    /// ItemNotFound("sku1") ── batch rejected, nothing changes
    /// ```
    #[error("Tried to update non-existing item id {0}")]
    ItemNotFound(ItemId),

    /// A listener failed while the event was being delivered.
    ///
    /// The mutation that raised the event has already been committed.
    #[error("Listener for {event} failed: {source}")]
    Listener {
        event: CartEventKind,
        #[source]
        source: ListenerError,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Raw item data validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is not a number.
    #[error("{field} was not a number")]
    NotNumeric { field: String },

    /// Invalid format (e.g., id of the wrong JSON type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a NotNumeric error for the given field.
    pub fn not_numeric(field: impl Into<String>) -> Self {
        ValidationError::NotNumeric {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
