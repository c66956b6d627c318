//! # Domain Types
//!
//! Core domain types for the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │     ItemId      │   │   FieldNames    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  "sku1"         │   │  id    = "id"   │       │
//! │  │  count (i64)    │   │  1 / 1.0 → "1"  │   │  count = "count"│       │
//! │  │  price (Money?) │   │  canonical text │   │  price = "price"│       │
//! │  │  metadata {..}  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ItemPatch: { field → JSON value } applied by update_all               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw Items
//! Product payloads arrive as JSON objects whose id/count/price keys are
//! configurable. [`Item::from_value`] lifts such an object into a typed
//! [`Item`]; [`Item::to_value`] writes it back with the same keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Item Identity
// =============================================================================

/// Stable identity of a cart line.
///
/// ## Canonical Form
/// - JSON strings are kept verbatim and must not be blank
/// - JSON numbers become their decimal text, integral floats without the
///   fraction (`1`, `1.0` → `"1"`, `2.5` → `"2.5"`)
///
/// Two ids are equal iff their canonical strings are equal, so a numeric id
/// from a product payload matches the string id read back from a form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from text. Blank text is rejected.
    pub fn new(id: impl Into<String>) -> ValidationResult<Self> {
        Self::named(id.into(), "id")
    }

    /// Lifts a JSON value read from the payload key `field` into an id.
    ///
    /// Errors name `field`, so a cart configured with `sku` ids reports
    /// `"sku is required"` rather than a generic message.
    pub fn from_value(value: &Value, field: &str) -> ValidationResult<Self> {
        match value {
            Value::String(s) => Self::named(s.clone(), field),
            Value::Number(n) => Ok(ItemId(validation::canonical_number(n))),
            Value::Null => Err(ValidationError::required(field)),
            other => Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: format!("expected a string or number, got {}", other),
            }),
        }
    }

    fn named(id: String, field: &str) -> ValidationResult<Self> {
        if id.trim().is_empty() {
            return Err(ValidationError::required(field));
        }
        Ok(ItemId(id))
    }

    /// Returns the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemId::new(s)
    }
}

// =============================================================================
// Field Names
// =============================================================================

/// Which keys of a raw item object carry the id, count and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub count: String,
    pub price: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        FieldNames {
            id: "id".to_string(),
            count: "count".to_string(),
            price: "price".to_string(),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// Partial field values applied to an existing line by `update_all`.
pub type ItemPatch = Map<String, Value>;

/// A line in the cart.
///
/// ## Invariants
/// - `id` is never blank
/// - Keys in `metadata` never collide with the configured id/count/price keys
/// - `unparsed_price` is only set while `price` is `None`
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Line identity.
    pub id: ItemId,

    /// Quantity in the cart. Expected positive but not enforced here.
    pub count: i64,

    /// Unit price. `None` when the payload had no usable price.
    pub price: Option<Money>,

    /// Every other field of the payload (name, url, img, ...).
    pub metadata: Map<String, Value>,

    /// The price value as supplied when it was present but unusable
    /// (`null`, `"n/a"`, sub-cent amounts). Written back verbatim.
    unparsed_price: Option<Value>,
}

impl Item {
    /// Creates an item with no metadata.
    pub fn new(id: ItemId, count: i64, price: Option<Money>) -> Self {
        Item {
            id,
            count,
            price,
            metadata: Map::new(),
            unparsed_price: None,
        }
    }

    /// Adds a metadata field (builder style).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Parses a raw JSON product payload.
    ///
    /// ## Rules
    /// - Must be a JSON object
    /// - `fields.id` must hold a non-blank string or a number
    /// - `fields.count` must hold a whole number (JSON number or numeric text)
    /// - `fields.price` is optional; a value that is not a whole-cent
    ///   decimal becomes `None` and is kept as supplied for write-back
    ///
    /// ## Example
    /// ```rust
    /// use cartman_core::{FieldNames, Item};
    /// use serde_json::json;
    ///
    /// let raw = json!({"id": 7, "count": "2", "price": 9.99, "name": "Mug"});
    /// let item = Item::from_value(&raw, &FieldNames::default()).unwrap();
    /// assert_eq!(item.id.as_str(), "7");
    /// assert_eq!(item.count, 2);
    /// assert_eq!(item.price.unwrap().cents(), 999);
    /// assert_eq!(item.metadata["name"], "Mug");
    /// ```
    pub fn from_value(value: &Value, fields: &FieldNames) -> ValidationResult<Self> {
        let object = value.as_object().ok_or_else(|| ValidationError::InvalidFormat {
            field: "item".to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let id = match object.get(&fields.id) {
            Some(raw) => ItemId::from_value(raw, &fields.id)?,
            None => return Err(ValidationError::required(fields.id.as_str())),
        };

        let count = match object.get(&fields.count) {
            Some(raw) => validation::parse_count(raw)
                .ok_or_else(|| ValidationError::not_numeric(fields.count.as_str()))?,
            None => return Err(ValidationError::required(fields.count.as_str())),
        };

        let (price, unparsed_price) = match object.get(&fields.price) {
            Some(raw) => read_price(raw),
            None => (None, None),
        };

        let metadata = object
            .iter()
            .filter(|(key, _)| !is_core_field(key, fields))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Item {
            id,
            count,
            price,
            metadata,
            unparsed_price,
        })
    }

    /// Writes the item back as a JSON object using the configured keys.
    pub fn to_value(&self, fields: &FieldNames) -> Value {
        let mut object = self.metadata.clone();
        object.insert(fields.id.clone(), Value::String(self.id.to_string()));
        object.insert(fields.count.clone(), Value::from(self.count));
        if let Some(price) = self.price {
            object.insert(fields.price.clone(), price.to_json_number());
        } else if let Some(raw) = &self.unparsed_price {
            object.insert(fields.price.clone(), raw.clone());
        }
        Value::Object(object)
    }

    /// Unit price × count, `None` when the price is missing or overflows.
    pub fn line_total(&self) -> Option<Money> {
        self.price?.checked_multiply_quantity(self.count)
    }

    /// Reads a metadata field as text.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// The raw price value kept when it could not be read as a price.
    pub fn unparsed_price(&self) -> Option<&Value> {
        self.unparsed_price.as_ref()
    }

    /// Replaces the price with a raw payload value.
    ///
    /// An unusable value clears the price so the line shows the fallback.
    pub fn set_price_value(&mut self, raw: &Value) {
        (self.price, self.unparsed_price) = read_price(raw);
    }

    /// Overwrites this record with the fields present on `newer`.
    ///
    /// A price key carried by `newer` replaces the stored price even when
    /// its value is unusable; keys it does not carry are kept. The count is
    /// NOT touched here.
    pub(crate) fn overwrite_from(&mut self, newer: &Item) {
        if newer.price.is_some() || newer.unparsed_price.is_some() {
            self.price = newer.price;
            self.unparsed_price = newer.unparsed_price.clone();
        }
        for (key, value) in &newer.metadata {
            self.metadata.insert(key.clone(), value.clone());
        }
    }
}

/// Parsed price plus the raw value when it is unusable.
fn read_price(raw: &Value) -> (Option<Money>, Option<Value>) {
    match validation::parse_price(raw) {
        Some(price) => (Some(price), None),
        None => (None, Some(raw.clone())),
    }
}

/// True when `key` is one of the configured id/count/price keys.
pub(crate) fn is_core_field(key: &str, fields: &FieldNames) -> bool {
    key == fields.id || key == fields.count || key == fields.price
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_id_canonical_form() {
        assert_eq!(ItemId::from_value(&json!("sku1"), "id").unwrap().as_str(), "sku1");
        assert_eq!(ItemId::from_value(&json!(1), "id").unwrap().as_str(), "1");
        assert_eq!(ItemId::from_value(&json!(1.0), "id").unwrap().as_str(), "1");
        assert_eq!(ItemId::from_value(&json!(2.5), "id").unwrap().as_str(), "2.5");
        assert_eq!(
            ItemId::from_value(&json!(1), "id").unwrap(),
            ItemId::new("1").unwrap()
        );
    }

    #[test]
    fn test_item_id_rejects_blank_and_odd_types() {
        assert!(ItemId::new("").is_err());
        assert!(ItemId::new("   ").is_err());
        assert!(ItemId::from_value(&json!(null), "id").is_err());
        assert!(ItemId::from_value(&json!(true), "id").is_err());
        assert!(ItemId::from_value(&json!({"a": 1}), "id").is_err());
    }

    #[test]
    fn test_id_errors_name_the_configured_key() {
        let fields = FieldNames {
            id: "sku".to_string(),
            ..FieldNames::default()
        };

        let err = Item::from_value(&json!({"sku": " ", "count": 1}), &fields).unwrap_err();
        assert_eq!(err.to_string(), "sku is required");

        let err = Item::from_value(&json!({"sku": null, "count": 1}), &fields).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "sku"));

        let err = Item::from_value(&json!({"sku": [1], "count": 1}), &fields).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "sku"));
    }

    #[test]
    fn test_from_value_splits_core_fields_from_metadata() {
        let raw = json!({
            "id": "sku1",
            "count": 2,
            "price": "9.99",
            "name": "Mug",
            "url": "/mug"
        });
        let item = Item::from_value(&raw, &FieldNames::default()).unwrap();

        assert_eq!(item.id.as_str(), "sku1");
        assert_eq!(item.count, 2);
        assert_eq!(item.price, Some(Money::from_cents(999)));
        assert_eq!(item.metadata.len(), 2);
        assert_eq!(item.text_field("name"), Some("Mug"));
    }

    #[test]
    fn test_from_value_requires_id_and_count() {
        let fields = FieldNames::default();

        let err = Item::from_value(&json!({"count": 1}), &fields).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "id"));

        let err = Item::from_value(&json!({"id": "a"}), &fields).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "count"));

        let err = Item::from_value(&json!({"id": "a", "count": "lots"}), &fields).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { .. }));

        assert!(Item::from_value(&json!(["a", 1]), &fields).is_err());
    }

    #[test]
    fn test_custom_field_names() {
        let fields = FieldNames {
            id: "sku".to_string(),
            count: "qty".to_string(),
            price: "unit".to_string(),
        };
        let raw = json!({"sku": "A-1", "qty": 3, "unit": 1.5, "id": "ignored-as-metadata"});
        let item = Item::from_value(&raw, &fields).unwrap();

        assert_eq!(item.id.as_str(), "A-1");
        assert_eq!(item.count, 3);
        assert_eq!(item.price, Some(Money::from_cents(150)));
        assert_eq!(item.metadata["id"], "ignored-as-metadata");

        let written = item.to_value(&fields);
        assert_eq!(written["sku"], "A-1");
        assert_eq!(written["qty"], 3);
        assert_eq!(written["unit"], 1.5);
    }

    #[test]
    fn test_to_value_omits_missing_price() {
        let item = Item::new(ItemId::new("x").unwrap(), 1, None).with_field("name", "X");
        let written = item.to_value(&FieldNames::default());
        assert_eq!(written, json!({"id": "x", "count": 1, "name": "X"}));
    }

    #[test]
    fn test_line_total() {
        let item = Item::new(ItemId::new("x").unwrap(), 3, Some(Money::from_cents(999)));
        assert_eq!(item.line_total(), Some(Money::from_cents(2997)));

        let unpriced = Item::new(ItemId::new("y").unwrap(), 3, None);
        assert_eq!(unpriced.line_total(), None);
    }

    #[test]
    fn test_overwrite_keeps_fields_the_newer_item_lacks() {
        let mut stored = Item::new(ItemId::new("x").unwrap(), 2, Some(Money::from_cents(999)))
            .with_field("name", "Old")
            .with_field("img", "/x.png");
        let newer = Item::new(ItemId::new("x").unwrap(), 1, None).with_field("name", "New");

        stored.overwrite_from(&newer);

        assert_eq!(stored.count, 2);
        assert_eq!(stored.price, Some(Money::from_cents(999)));
        assert_eq!(stored.text_field("name"), Some("New"));
        assert_eq!(stored.text_field("img"), Some("/x.png"));
    }

    #[test]
    fn test_unusable_price_is_kept_as_supplied() {
        let fields = FieldNames::default();
        for raw in [json!(null), json!("n/a"), json!(0.333)] {
            let item = Item::from_value(&json!({"id": "a", "count": 1, "price": raw}), &fields)
                .unwrap();

            assert_eq!(item.price, None);
            assert_eq!(item.unparsed_price(), Some(&raw));
            assert_eq!(item.to_value(&fields)["price"], raw);
        }
    }

    #[test]
    fn test_overwrite_with_unusable_price_clears_stored_price() {
        let fields = FieldNames::default();
        let mut stored = Item::new(ItemId::new("a").unwrap(), 1, Some(Money::from_cents(999)));
        let newer = Item::from_value(&json!({"id": "a", "count": 1, "price": null}), &fields)
            .unwrap();

        stored.overwrite_from(&newer);

        assert_eq!(stored.price, None);
        assert_eq!(stored.line_total(), None);
        assert_eq!(stored.to_value(&fields)["price"], Value::Null);
    }

    #[test]
    fn test_set_price_value() {
        let mut item = Item::new(ItemId::new("a").unwrap(), 2, Some(Money::from_cents(500)));

        item.set_price_value(&json!("n/a"));
        assert_eq!(item.price, None);

        item.set_price_value(&json!("1.25"));
        assert_eq!(item.price, Some(Money::from_cents(125)));
        assert_eq!(item.unparsed_price(), None);
    }
}
