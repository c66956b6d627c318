//! # Cart Manager
//!
//! Owns the cart line items, the mutation API and the event bus.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Manager Operations                              │
//! │                                                                         │
//! │  UI Action             Manager Call           State Change    Events    │
//! │  ─────────             ────────────           ────────────    ──────    │
//! │                                                                         │
//! │  Page load ──────────► refresh_from_store() ► items = store  init       │
//! │                                                                         │
//! │  Add button ─────────► add(item) ───────────► count += n     added      │
//! │                                                                         │
//! │  Update button ──────► update_all({..}) ────► fields / drop  mass-upd.  │
//! │                                                                         │
//! │  Remove link ────────► remove(id) ──────────► items - id     removed    │
//! │                                                                         │
//! │  Remove all ─────────► clear() ─────────────► items = []     cleared    │
//! │                                                                         │
//! │  Every mutation persists the whole list, then fires its event and      │
//! │  finally cart-changed.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! - Validation failures (`InvalidItem`, `ItemNotFound`) change nothing and
//!   fire nothing; `update_all` checks the whole batch before committing.
//! - A store write that fails is logged and the mutation still stands.
//! - A listener that fails surfaces as `CartError::Listener` after the
//!   mutation has been committed.

use serde_json::Value;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult, ValidationError};
use crate::events::{CartEvent, CartEventKind, EventBus, ListenerId, ListenerResult};
use crate::money::Money;
use crate::store::CartStore;
use crate::types::{is_core_field, FieldNames, Item, ItemId, ItemPatch};
use crate::validation::parse_count;
use crate::{view, DEFAULT_STORE_KEY};

/// The cart.
///
/// ## Invariants
/// - Items are unique by id (adding an existing id accumulates its count)
/// - The store always mirrors `contents()` after a successful write
/// - Item order is insertion order; updates keep an item's position
pub struct CartManager<S: CartStore> {
    store: S,
    store_key: String,
    fields: FieldNames,
    contents: Vec<Item>,
    bus: EventBus<CartManager<S>>,
}

impl<S: CartStore> CartManager<S> {
    /// Creates an empty cart backed by `store`.
    ///
    /// The cart stays empty until [`CartManager::refresh_from_store`] runs.
    pub fn new(store: S) -> Self {
        CartManager {
            store,
            store_key: DEFAULT_STORE_KEY.to_string(),
            fields: FieldNames::default(),
            contents: Vec::new(),
            bus: EventBus::new(),
        }
    }

    /// Sets the store key the list is persisted under.
    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    /// Sets which payload keys hold the id, count and price.
    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener for one event kind.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart.on(CartEventKind::CartChanged, move |cart, _| {
    ///     views.borrow_mut().refresh(cart.contents());
    ///     Ok(())
    /// });
    /// ```
    pub fn on<F>(&mut self, kind: CartEventKind, listener: F) -> ListenerId
    where
        F: Fn(&CartManager<S>, &CartEvent) -> ListenerResult + 'static,
    {
        self.bus.subscribe(kind, listener)
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the in-memory items with the persisted list.
    ///
    /// A missing key, a store error or a value that is not a list of valid,
    /// uniquely identified items all load as an empty cart.
    pub fn refresh_from_store(&mut self) -> CartResult<()> {
        self.contents = self.load();
        info!(key = %self.store_key, items = self.contents.len(), "Cart loaded from store");
        self.notify(CartEvent::CartInitialized)
    }

    /// Adds an item, or accumulates its count onto the existing line.
    ///
    /// ## Behavior
    /// - Same id already in cart: price and metadata carried by `item`
    ///   replace the stored ones, count becomes old + new. A price key with
    ///   an unusable value still replaces the stored price.
    /// - New id: appended at the end
    ///
    /// ## Errors
    /// `InvalidItem` if the accumulated count overflows.
    pub fn add(&mut self, item: Item) -> CartResult<()> {
        match self.contents.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                let count = existing.count.checked_add(item.count).ok_or_else(|| {
                    ValidationError::OutOfRange {
                        field: self.fields.count.clone(),
                        min: i64::MIN,
                        max: i64::MAX,
                    }
                })?;
                existing.overwrite_from(&item);
                existing.count = count;
                debug!(item_id = %item.id, count, "Accumulated item count");
            }
            None => {
                debug!(item_id = %item.id, count = item.count, "Added new item");
                self.contents.push(item.clone());
            }
        }

        self.persist();
        self.notify(CartEvent::ItemAdded(item))
    }

    /// Parses a raw product payload with the configured field names and adds it.
    ///
    /// ## Errors
    /// `InvalidItem` if the id is missing/blank or the count is missing or
    /// not a whole number.
    pub fn add_value(&mut self, raw: &Value) -> CartResult<()> {
        let item = Item::from_value(raw, &self.fields)?;
        self.add(item)
    }

    /// Applies a batch of partial updates.
    ///
    /// ## Behavior
    /// - Each id must already be in the cart; no lines are created
    /// - A count that ends up ≤ 0 removes the line
    /// - The id key of a patch is ignored; ids never change
    /// - A patch price that cannot be read clears the line's price
    /// - All-or-nothing: the batch is applied to a copy and committed only if
    ///   every entry succeeds
    /// - One persist and one `items-mass-updated` + `cart-changed` per batch
    ///
    /// ## Errors
    /// - `ItemNotFound` for an unknown id
    /// - `InvalidItem` for a count that is not a whole number
    pub fn update_all<I>(&mut self, mappings: I) -> CartResult<()>
    where
        I: IntoIterator<Item = (ItemId, ItemPatch)>,
    {
        let mut working = self.contents.clone();

        for (id, patch) in mappings {
            let position = working
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;

            let count = match patch.get(&self.fields.count) {
                Some(raw) => Some(
                    parse_count(raw)
                        .ok_or_else(|| ValidationError::not_numeric(self.fields.count.as_str()))?,
                ),
                None => None,
            };

            if matches!(count, Some(c) if c <= 0) {
                debug!(item_id = %id, "Count dropped to zero, removing item");
                working.remove(position);
                continue;
            }

            let item = &mut working[position];
            if let Some(count) = count {
                item.count = count;
            }
            if let Some(raw) = patch.get(&self.fields.price) {
                item.set_price_value(raw);
            }
            for (key, value) in &patch {
                if !is_core_field(key, &self.fields) {
                    item.metadata.insert(key.clone(), value.clone());
                }
            }
            debug!(item_id = %id, count = item.count, "Updated item");
        }

        self.contents = working;
        self.persist();
        self.notify(CartEvent::ItemsMassUpdated)
    }

    /// Removes the line with `id`.
    ///
    /// Unknown ids are silently ignored: nothing is persisted or emitted and
    /// `Ok(None)` is returned.
    pub fn remove(&mut self, id: &ItemId) -> CartResult<Option<Item>> {
        let Some(position) = self.contents.iter().position(|i| &i.id == id) else {
            debug!(item_id = %id, "Remove ignored, item not in cart");
            return Ok(None);
        };

        let item = self.contents.remove(position);
        debug!(item_id = %id, "Removed item");
        self.persist();
        self.notify(CartEvent::ItemRemoved(item.clone()))?;
        Ok(Some(item))
    }

    /// Removes every line.
    pub fn clear(&mut self) -> CartResult<()> {
        self.contents.clear();
        debug!("Cleared cart");
        self.persist();
        self.notify(CartEvent::CartCleared)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the line with `id`, if present.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.contents.iter().find(|i| &i.id == id)
    }

    /// Returns the lines in cart order.
    pub fn contents(&self) -> &[Item] {
        &self.contents
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Sum of count × price over all lines; `None` if any price is unknown.
    pub fn total_price(&self) -> Option<Money> {
        view::total_price(&self.contents)
    }

    /// The field names used to read and write raw items.
    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// The key the list is persisted under.
    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    /// Read access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the manager, returning the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The contents as the JSON list written to the store.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.contents
                .iter()
                .map(|item| item.to_value(&self.fields))
                .collect(),
        )
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn load(&self) -> Vec<Item> {
        let values = match self.store.get(&self.store_key) {
            Ok(Some(Value::Array(values))) => values,
            Ok(Some(other)) => {
                warn!(key = %self.store_key, kind = json_kind(&other), "Stored cart is not a list, starting empty");
                return Vec::new();
            }
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.store_key, error = %e, "Failed to read cart from store, starting empty");
                return Vec::new();
            }
        };

        let mut items: Vec<Item> = Vec::with_capacity(values.len());
        for value in &values {
            match Item::from_value(value, &self.fields) {
                Ok(item) if items.iter().any(|i| i.id == item.id) => {
                    warn!(item_id = %item.id, "Stored cart repeats an item id, starting empty");
                    return Vec::new();
                }
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(error = %e, "Stored cart holds an invalid item, starting empty");
                    return Vec::new();
                }
            }
        }
        items
    }

    fn persist(&mut self) {
        let value = self.to_value();
        if let Err(e) = self.store.set(&self.store_key, value) {
            warn!(key = %self.store_key, error = %e, "Failed to persist cart");
        }
    }

    /// Fires `event`, then `cart-changed`.
    fn notify(&self, event: CartEvent) -> CartResult<()> {
        self.bus.emit(self, &event)?;
        self.bus.emit(self, &CartEvent::CartChanged)
    }
}

impl<S: CartStore> fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("store_key", &self.store_key)
            .field("fields", &self.fields)
            .field("contents", &self.contents)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
