//! # Cart Renderer
//!
//! The only `cart-changed` subscriber. Every change re-derives both views
//! from the full cart contents; there is no incremental patching.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartManager ── cart-changed ──► Renderer listener                      │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                        MiniCartView::derive(contents)                   │
//! │                        CartView::derive(contents)                       │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                        Rc<RefCell<RenderedViews>>  ◄── commands read    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cartman_core::{
    CartEventKind, CartManager, CartStore, CartView, Item, ListenerId, MiniCartView,
    PriceFormatter,
};
use serde::Serialize;
use tracing::trace;

/// The last rendered state of both views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedViews {
    pub mini_cart: MiniCartView,
    pub checkout: CartView,
}

impl RenderedViews {
    fn derive(items: &[Item], formatter: &dyn PriceFormatter) -> Self {
        RenderedViews {
            mini_cart: MiniCartView::derive(items, formatter),
            checkout: CartView::derive(items, formatter),
        }
    }
}

/// Handle to views kept current by a cart listener.
#[derive(Debug, Clone)]
pub struct Renderer {
    views: Rc<RefCell<RenderedViews>>,
    renders: Rc<Cell<u64>>,
    listener: ListenerId,
}

impl Renderer {
    /// Subscribes to `cart-changed` and renders the current contents once.
    ///
    /// `formatter` renders every unit price, line total and cart total.
    pub fn attach<S, F>(cart: &mut CartManager<S>, formatter: F) -> Self
    where
        S: CartStore,
        F: PriceFormatter + 'static,
    {
        let views = Rc::new(RefCell::new(RenderedViews::derive(cart.contents(), &formatter)));
        let renders = Rc::new(Cell::new(0));

        let listener = {
            let views = Rc::clone(&views);
            let renders = Rc::clone(&renders);
            cart.on(CartEventKind::CartChanged, move |cart, _| {
                *views.borrow_mut() = RenderedViews::derive(cart.contents(), &formatter);
                renders.set(renders.get() + 1);
                trace!(lines = cart.len(), "Views re-rendered");
                Ok(())
            })
        };

        Renderer {
            views,
            renders,
            listener,
        }
    }

    /// Unsubscribes from the cart. The views keep their last state.
    pub fn detach<S: CartStore>(&self, cart: &mut CartManager<S>) -> bool {
        cart.off(self.listener)
    }

    /// Clone of the current views.
    pub fn snapshot(&self) -> RenderedViews {
        self.views.borrow().clone()
    }

    /// How many `cart-changed` events have been rendered.
    pub fn render_count(&self) -> u64 {
        self.renders.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartman_core::view::CheckoutTemplate;
    use cartman_core::{ItemId, Money, PlainPriceFormatter};
    use cartman_store::MemoryStore;
    use serde_json::json;

    fn cart() -> CartManager<MemoryStore> {
        CartManager::new(MemoryStore::new())
    }

    #[test]
    fn test_initial_render_is_empty() {
        let mut cart = cart();
        let renderer = Renderer::attach(&mut cart, PlainPriceFormatter::default());

        let views = renderer.snapshot();
        assert!(views.mini_cart.empty);
        assert_eq!(views.checkout.template, CheckoutTemplate::Empty);
        assert_eq!(renderer.render_count(), 0);
    }

    #[test]
    fn test_renders_on_every_change() {
        let mut cart = cart();
        let renderer = Renderer::attach(&mut cart, PlainPriceFormatter::default());

        cart.add_value(&json!({"id": "a", "count": 2, "price": "9.99", "name": "Mug"}))
            .unwrap();
        let views = renderer.snapshot();
        let filled = views.mini_cart.filled.unwrap();
        assert_eq!(filled.count, 1);
        assert_eq!(filled.total, "19.98");
        assert_eq!(views.checkout.products[0].name.as_deref(), Some("Mug"));

        cart.remove(&ItemId::new("a").unwrap()).unwrap();
        assert!(renderer.snapshot().mini_cart.empty);
        assert_eq!(renderer.render_count(), 2);
    }

    #[test]
    fn test_fallback_for_unpriced_lines() {
        let mut cart = cart();
        let renderer = Renderer::attach(&mut cart, PlainPriceFormatter::with_fallback("n/a"));

        cart.add_value(&json!({"id": "a", "count": 1})).unwrap();
        assert_eq!(renderer.snapshot().checkout.total, "n/a");
    }

    #[test]
    fn test_custom_formatter() {
        let mut cart = cart();
        let dollars = |amount: Option<Money>| match amount {
            Some(money) => format!("${money}"),
            None => "call us".to_string(),
        };
        let renderer = Renderer::attach(&mut cart, dollars);

        cart.add_value(&json!({"id": "a", "count": 2, "price": 4.5})).unwrap();
        let views = renderer.snapshot();
        assert_eq!(views.checkout.products[0].price, "$4.50");
        assert_eq!(views.checkout.total, "$9.00");

        cart.add_value(&json!({"id": "b", "count": 1})).unwrap();
        assert_eq!(renderer.snapshot().checkout.total, "call us");
    }

    #[test]
    fn test_detach_stops_rendering() {
        let mut cart = cart();
        let renderer = Renderer::attach(&mut cart, PlainPriceFormatter::default());

        assert!(renderer.detach(&mut cart));
        cart.add_value(&json!({"id": "a", "count": 1})).unwrap();

        assert!(renderer.snapshot().mini_cart.empty);
        assert_eq!(renderer.render_count(), 0);
    }
}
