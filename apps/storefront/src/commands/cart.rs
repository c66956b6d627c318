//! # Cart Commands
//!
//! Handlers behind the storefront buttons. Each returns the re-rendered
//! views so the caller never has to ask twice.
//!
//! ## Button → Handler
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product page "Add" ────────► add_product(payload, count text)         │
//! │  Checkout row "×" ──────────► remove_line(id)                          │
//! │  Checkout "Update" ─────────► update_lines([(id, count text), ...])    │
//! │  Checkout "Remove all" ─────► remove_all()                             │
//! │  Page load / refresh ───────► get_cart()                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cartman_core::validation::parse_requested_count;
use cartman_core::{CartStore, ItemId, ItemPatch};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ApiError, ErrorCode};
use crate::renderer::RenderedViews;
use crate::state::CartSession;

/// Key in a product payload that marks it as not for sale.
pub const UNAVAILABLE_FLAG: &str = "unavailable";

/// Gets the current views.
pub fn get_cart<S: CartStore>(session: &CartSession<S>) -> RenderedViews {
    debug!("get_cart command");
    session.views()
}

/// Adds a product from its page payload.
///
/// ## Behavior
/// - Payload must be a JSON object using the configured field names
/// - `"unavailable": true` refuses the product
/// - The typed count is read leniently (`"2 pcs"` → 2, `"abc"` → 0)
/// - A count ≤ 0 adds nothing and is not an error
/// - The typed count replaces any count in the payload
///
/// ## Errors
/// - `VALIDATION_ERROR` for unparseable JSON or an unusable item
/// - `UNAVAILABLE` for a product flagged unavailable
pub fn add_product<S: CartStore>(
    session: &mut CartSession<S>,
    payload: &str,
    count_text: &str,
) -> Result<RenderedViews, ApiError> {
    let mut product = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(product)) => product,
        Ok(_) => return Err(ApiError::validation("Product payload must be a JSON object")),
        Err(e) => return Err(ApiError::validation(format!("Invalid product payload: {e}"))),
    };

    if product.get(UNAVAILABLE_FLAG).and_then(Value::as_bool) == Some(true) {
        return Err(ApiError::new(
            ErrorCode::Unavailable,
            "Product is not available for sale",
        ));
    }

    let count = parse_requested_count(count_text);
    if count <= 0 {
        debug!(count_text, "add_product ignored, count not positive");
        return Ok(session.views());
    }

    let count_field = session.cart().fields().count.clone();
    product.insert(count_field, Value::from(count));
    session.cart_mut().add_value(&Value::Object(product))?;

    info!(count, "Product added to cart");
    Ok(session.views())
}

/// Removes one line. Unknown ids leave the cart untouched.
pub fn remove_line<S: CartStore>(
    session: &mut CartSession<S>,
    id: &str,
) -> Result<RenderedViews, ApiError> {
    let id = ItemId::new(id)?;
    if session.cart_mut().remove(&id)?.is_none() {
        debug!(item_id = %id, "remove_line: not in cart");
    }
    Ok(session.views())
}

/// Applies the checkout form's count inputs as one batch.
///
/// Each count is passed through as typed; a count ≤ 0 removes the line.
///
/// ## Errors
/// - `NOT_FOUND` if any id is not in the cart (nothing is applied)
/// - `VALIDATION_ERROR` if any count is not a whole number
pub fn update_lines<S: CartStore>(
    session: &mut CartSession<S>,
    rows: &[(String, String)],
) -> Result<RenderedViews, ApiError> {
    let count_field = session.cart().fields().count.clone();

    let batch = rows
        .iter()
        .map(|(id, count)| -> Result<(ItemId, ItemPatch), ApiError> {
            let mut patch = ItemPatch::new();
            patch.insert(count_field.clone(), Value::String(count.trim().to_string()));
            Ok((ItemId::new(id.as_str())?, patch))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = batch.len(), "update_lines command");
    session.cart_mut().update_all(batch)?;
    Ok(session.views())
}

/// Empties the cart.
pub fn remove_all<S: CartStore>(session: &mut CartSession<S>) -> Result<RenderedViews, ApiError> {
    debug!("remove_all command");
    session.cart_mut().clear()?;
    Ok(session.views())
}

/// Splits an `id=count` form row.
///
/// The id may itself contain `=`; the count is whatever follows the last one.
pub fn parse_row(row: &str) -> Result<(String, String), ApiError> {
    let (id, count) = row
        .rsplit_once('=')
        .ok_or_else(|| ApiError::validation(format!("Expected id=count, got '{row}'")))?;
    Ok((id.to_string(), count.to_string()))
}
