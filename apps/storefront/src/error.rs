//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  cartman add '{"id":"sku1"}' 2                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad payload? ────── serde_json::Error ─────────────┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Cart rule broken? ── CartError::InvalidItem ──── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: {"code": "VALIDATION_ERROR", "message": "count was not ..."} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cartman_core::{CartError, ValidationError};
use cartman_store::StoreError;
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Tried to update non-existing item id sku9"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item not in the cart
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product is flagged as unavailable
    Unavailable,

    /// Checkout requested on an empty cart
    CartEmpty,

    /// Store could not be opened or written
    StoreError,

    /// Configuration could not be loaded
    ConfigError,

    /// A cart listener failed
    ListenerError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts cart errors to API errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidItem(e) => ApiError::from(e),
            CartError::ItemNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CartError::Listener { event, source } => {
                tracing::error!(%event, error = %source, "Cart listener failed");
                ApiError::new(
                    ErrorCode::ListenerError,
                    format!("Cart updated but the {event} listener failed: {source}"),
                )
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoDataDir => ApiError::new(ErrorCode::StoreError, err.to_string()),
            other => {
                // Log the actual error but keep the message short
                tracing::error!("Store failure: {}", other);
                ApiError::new(ErrorCode::StoreError, "Cart store is unavailable")
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use cartman_core::ItemId;

    #[test]
    fn test_not_found_mapping() {
        let err = ApiError::from(CartError::ItemNotFound(ItemId::new("sku9").unwrap()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Tried to update non-existing item id sku9");
    }

    #[test]
    fn test_validation_mapping() {
        let err = ApiError::from(CartError::from(ValidationError::not_numeric("count")));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("count"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::CartEmpty, "Cart is empty");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CART_EMPTY");
        assert_eq!(json["message"], "Cart is empty");
    }

    #[test]
    fn test_store_errors_hide_paths() {
        let err = ApiError::from(StoreError::corrupt("/home/me/cart.json", "bad"));
        assert_eq!(err.code, ErrorCode::StoreError);
        assert!(!err.message.contains("/home/me"));
    }
}
