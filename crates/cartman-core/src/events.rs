//! # Cart Events
//!
//! Typed, synchronous, same-thread event bus.
//!
//! ## Delivery Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart.add(item)                                                         │
//! │     │                                                                   │
//! │     ├── update list, persist                                            │
//! │     │                                                                   │
//! │     ├── emit ItemAdded ──► listener #1 ──► listener #3   (registration  │
//! │     │                                                     order)        │
//! │     └── emit CartChanged ─► listener #2 (mini-cart) ─► #4 (checkout)    │
//! │                                                                         │
//! │  A listener error stops delivery and is returned from cart.add()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is followed by [`CartEventKind::CartChanged`], so a UI
//! that only needs to re-render can subscribe to that one kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CartError, CartResult};
use crate::types::Item;

// =============================================================================
// Event Types
// =============================================================================

/// The kinds of events a cart emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CartEventKind {
    /// An item was added or its count accumulated.
    ItemAdded,
    /// An item was removed.
    ItemRemoved,
    /// A batch of items was updated.
    ItemsMassUpdated,
    /// All items were removed.
    CartCleared,
    /// Contents were (re)loaded from the store.
    CartInitialized,
    /// Catch-all, fired after every other event.
    CartChanged,
}

impl CartEventKind {
    /// Every kind, in declaration order.
    pub const ALL: [CartEventKind; 6] = [
        CartEventKind::ItemAdded,
        CartEventKind::ItemRemoved,
        CartEventKind::ItemsMassUpdated,
        CartEventKind::CartCleared,
        CartEventKind::CartInitialized,
        CartEventKind::CartChanged,
    ];

    /// Returns the event name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CartEventKind::ItemAdded => "item-added",
            CartEventKind::ItemRemoved => "item-removed",
            CartEventKind::ItemsMassUpdated => "items-mass-updated",
            CartEventKind::CartCleared => "cart-cleared",
            CartEventKind::CartInitialized => "cart-initialized",
            CartEventKind::CartChanged => "cart-changed",
        }
    }
}

impl fmt::Display for CartEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// Carries the item exactly as it was passed to `add`.
    ItemAdded(Item),
    /// Carries the removed record.
    ItemRemoved(Item),
    ItemsMassUpdated,
    CartCleared,
    CartInitialized,
    CartChanged,
}

impl CartEvent {
    /// Returns the kind of this event.
    pub fn kind(&self) -> CartEventKind {
        match self {
            CartEvent::ItemAdded(_) => CartEventKind::ItemAdded,
            CartEvent::ItemRemoved(_) => CartEventKind::ItemRemoved,
            CartEvent::ItemsMassUpdated => CartEventKind::ItemsMassUpdated,
            CartEvent::CartCleared => CartEventKind::CartCleared,
            CartEvent::CartInitialized => CartEventKind::CartInitialized,
            CartEvent::CartChanged => CartEventKind::CartChanged,
        }
    }

    /// Returns the item payload, if this event carries one.
    pub fn item(&self) -> Option<&Item> {
        match self {
            CartEvent::ItemAdded(item) | CartEvent::ItemRemoved(item) => Some(item),
            _ => None,
        }
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Error type a listener may fail with.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by listeners.
pub type ListenerResult = Result<(), ListenerError>;

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<C> = Box<dyn Fn(&C, &CartEvent) -> ListenerResult>;

/// Registration-ordered listener table.
///
/// `C` is the context handed to listeners alongside the event; the cart
/// manager passes itself.
pub struct EventBus<C> {
    listeners: Vec<(ListenerId, CartEventKind, Listener<C>)>,
    next_id: u64,
}

impl<C> EventBus<C> {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        EventBus {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a listener for one event kind.
    pub fn subscribe<F>(&mut self, kind: CartEventKind, listener: F) -> ListenerId
    where
        F: Fn(&C, &CartEvent) -> ListenerResult + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: CartEventKind) -> usize {
        self.listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Delivers `event` to every listener of its kind, in registration order.
    ///
    /// Stops at the first failing listener.
    pub fn emit(&self, context: &C, event: &CartEvent) -> CartResult<()> {
        let kind = event.kind();
        for (_, _, listener) in self.listeners.iter().filter(|(_, k, _)| *k == kind) {
            listener(context, event).map_err(|source| CartError::Listener {
                event: kind,
                source,
            })?;
        }
        Ok(())
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_event_names() {
        assert_eq!(CartEventKind::ItemAdded.to_string(), "item-added");
        assert_eq!(CartEventKind::CartChanged.as_str(), "cart-changed");
        assert_eq!(
            serde_json::to_string(&CartEventKind::ItemsMassUpdated).unwrap(),
            "\"items-mass-updated\""
        );
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let mut bus: EventBus<()> = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for n in 1..=3 {
            let seen = Rc::clone(&seen);
            bus.subscribe(CartEventKind::CartChanged, move |_, _| {
                seen.borrow_mut().push(n);
                Ok(())
            });
        }

        bus.emit(&(), &CartEvent::CartChanged).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_only_matching_kind_is_delivered() {
        let mut bus: EventBus<()> = EventBus::new();
        let hits = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&hits);
        bus.subscribe(CartEventKind::CartCleared, move |_, _| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        bus.emit(&(), &CartEvent::CartChanged).unwrap();
        assert_eq!(*hits.borrow(), 0);

        bus.emit(&(), &CartEvent::CartCleared).unwrap();
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus: EventBus<()> = EventBus::new();
        let id = bus.subscribe(CartEventKind::CartChanged, |_, _| Ok(()));
        assert_eq!(bus.listener_count(CartEventKind::CartChanged), 1);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.listener_count(CartEventKind::CartChanged), 0);
    }

    #[test]
    fn test_failing_listener_stops_delivery() {
        let mut bus: EventBus<()> = EventBus::new();
        let reached = Rc::new(RefCell::new(false));

        bus.subscribe(CartEventKind::CartChanged, |_, _| Err("boom".into()));
        let flag = Rc::clone(&reached);
        bus.subscribe(CartEventKind::CartChanged, move |_, _| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        let err = bus.emit(&(), &CartEvent::CartChanged).unwrap_err();
        assert!(matches!(
            err,
            CartError::Listener {
                event: CartEventKind::CartChanged,
                ..
            }
        ));
        assert!(!*reached.borrow());
    }
}
