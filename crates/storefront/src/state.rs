//! Application state shared across handlers.

use std::sync::{Arc, Mutex, PoisonError};

use potted_core::{Cart, Product, ProductId};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// The shared cart store.
///
/// Owns the single cart aggregate for the process and serializes mutations
/// behind a mutex: each operation is applied atomically and returns the
/// updated snapshot the caller renders from. The store is constructed
/// explicitly and passed by reference through [`AppState`] - there is no
/// global singleton, which keeps it trivially constructible in tests.
///
/// Every operation is total, mirroring the cart contract: unknown ids are
/// silent no-ops and lock poisoning is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A read-only snapshot of the current cart state.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Add a product with quantity 1; idempotent on repeat adds.
    /// Returns the updated snapshot.
    pub fn add(&self, product: Product) -> Cart {
        let mut cart = self.lock();
        cart.add(product);
        cart.clone()
    }

    /// Increment the quantity of `id` by 1. Returns the updated snapshot.
    pub fn increase(&self, id: ProductId) -> Cart {
        let mut cart = self.lock();
        cart.increase(id);
        cart.clone()
    }

    /// Decrement the quantity of `id` by 1, stopping at 1.
    /// Returns the updated snapshot.
    pub fn decrease(&self, id: ProductId) -> Cart {
        let mut cart = self.lock();
        cart.decrease(id);
        cart.clone()
    }

    /// Remove the item with `id`. Returns the updated snapshot.
    pub fn remove(&self, id: ProductId) -> Cart {
        let mut cart = self.lock();
        cart.remove(id);
        cart.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        // A poisoned lock only means a panic happened mid-render elsewhere;
        // the cart itself upholds its invariants after every operation.
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog and the cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state with an empty cart.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: CartStore::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use potted_core::{CurrencyCode, Price};

    use super::*;

    fn plant(id: i32, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            handle: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: None,
            description: None,
        }
    }

    #[test]
    fn test_store_starts_empty() {
        let store = CartStore::new();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_store_returns_updated_snapshot() {
        let store = CartStore::new();
        let cart = store.add(plant(1, "Monstera Deliciosa", 3800));
        assert_eq!(cart.total_quantity(), 1);

        let cart = store.increase(ProductId::new(1));
        assert_eq!(cart.total_quantity(), 2);

        let cart = store.remove(ProductId::new(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let store = CartStore::new();
        store.add(plant(1, "Monstera Deliciosa", 3800));

        let snapshot = store.snapshot();
        store.increase(ProductId::new(1));

        // The earlier snapshot is unaffected by later mutations
        assert_eq!(snapshot.total_quantity(), 1);
        assert_eq!(store.snapshot().total_quantity(), 2);
    }

    #[test]
    fn test_app_state_shares_one_cart_across_clones() {
        let catalog = Catalog::from_products(vec![plant(1, "Monstera Deliciosa", 3800)]).unwrap();
        let state = AppState::new(StorefrontConfig::default(), catalog);
        let other = state.clone();

        state.cart().add(plant(1, "Monstera Deliciosa", 3800));
        assert_eq!(other.cart().snapshot().total_quantity(), 1);
    }
}
