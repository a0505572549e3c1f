//! Persisted cart store with change notification.
//!
//! [`CartStore`] is the single source of truth for cart contents, shared by
//! the cart view, the checkout flow, and the navigation badge counter. It is
//! an explicit store object injected where needed rather than ambient global
//! state: interested parties register a subscriber and are notified with a
//! snapshot reference after every mutation.
//!
//! Every mutation writes the cart through to the durable local store under
//! [`storage_keys::CART`]. A malformed persisted payload on load degrades to
//! an empty cart. Persist failures are logged and swallowed so the mutation
//! operations stay total, matching the fire-and-forget semantics of browser
//! local storage writes.

use embermart_core::{Cart, CartLine, Money, ProductId};
use tracing::warn;

use crate::storage::{LocalStore, storage_keys};

/// Callback invoked with the cart snapshot after every mutation.
pub type CartSubscriber = Box<dyn Fn(&Cart) + Send + Sync>;

/// Single source of truth for the shopping cart.
pub struct CartStore {
    store: LocalStore,
    cart: Cart,
    subscribers: Vec<CartSubscriber>,
}

impl CartStore {
    /// Rehydrate the cart from durable local storage.
    ///
    /// A missing or malformed persisted payload yields an empty cart; this
    /// never fails.
    #[must_use]
    pub fn load(store: LocalStore) -> Self {
        let cart = store.get::<Cart>(storage_keys::CART).unwrap_or_default();
        Self {
            store,
            cart,
            subscribers: Vec::new(),
        }
    }

    /// The current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Total quantity across all lines (the navigation badge number).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Register a change subscriber, invoked after every mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&Cart) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Add a product to the cart (merging with an existing line), persist,
    /// and notify subscribers.
    pub fn add_item(&mut self, line: CartLine) {
        self.cart.add_item(line);
        self.persist();
        self.notify();
    }

    /// Remove a product's line (no-op if absent), persist, and notify
    /// subscribers.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.cart.remove_item(product_id);
        self.persist();
        self.notify();
    }

    /// Overwrite a line's quantity (zero removes the line), persist, and
    /// notify subscribers.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        self.cart.update_quantity(product_id, quantity);
        self.persist();
        self.notify();
    }

    /// Empty the cart, erase the persisted copy, and notify subscribers.
    pub fn clear(&mut self) {
        self.cart.clear();
        if let Err(e) = self.store.remove(storage_keys::CART) {
            warn!(error = %e, "Failed to erase persisted cart");
        }
        self.notify();
    }

    fn persist(&self) {
        if let Err(e) = self.store.set(storage_keys::CART, &self.cart) {
            warn!(error = %e, "Failed to persist cart");
        }
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.cart);
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use embermart_core::{CurrencyCode, Money};

    use super::*;

    fn line(id: i64, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Money::new(price.parse().unwrap(), CurrencyCode::USD),
            available_stock: 50,
            quantity,
        }
    }

    fn open_store(dir: &std::path::Path) -> LocalStore {
        LocalStore::open(dir).unwrap()
    }

    #[test]
    fn test_cart_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut cart = CartStore::load(open_store(dir.path()));
            cart.add_item(line(1, "5000", 2));
            cart.add_item(line(2, "1500", 3));
        }

        let reloaded = CartStore::load(open_store(dir.path()));
        assert_eq!(reloaded.cart().len(), 2);
        assert_eq!(reloaded.total().amount, "14500".parse().unwrap());
        assert_eq!(reloaded.item_count(), 5);
    }

    #[test]
    fn test_clear_then_reload_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut cart = CartStore::load(open_store(dir.path()));
            cart.add_item(line(1, "5000", 2));
            cart.clear();
        }

        let reloaded = CartStore::load(open_store(dir.path()));
        assert!(reloaded.cart().is_empty());
    }

    #[test]
    fn test_malformed_persisted_cart_yields_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        store
            .set(storage_keys::CART, &serde_json::json!({"not": "a cart"}))
            .unwrap();

        let cart = CartStore::load(store);
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_subscribers_notified_on_every_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = CartStore::load(open_store(dir.path()));

        let calls = Arc::new(AtomicU32::new(0));
        let seen_count = Arc::new(AtomicU32::new(0));
        {
            let calls = Arc::clone(&calls);
            let seen_count = Arc::clone(&seen_count);
            cart.subscribe(move |snapshot| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen_count.store(snapshot.item_count(), Ordering::SeqCst);
            });
        }

        cart.add_item(line(1, "5000", 2));
        cart.update_quantity(ProductId::new(1), 4);
        cart.remove_item(ProductId::new(1));
        cart.clear();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(seen_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_update_quantity_zero_persists_removal() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut cart = CartStore::load(open_store(dir.path()));
            cart.add_item(line(1, "5000", 2));
            cart.update_quantity(ProductId::new(1), 0);
        }

        let reloaded = CartStore::load(open_store(dir.path()));
        assert!(reloaded.cart().is_empty());
    }
}
