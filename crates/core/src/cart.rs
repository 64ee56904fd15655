//! The cart aggregate and its mutation operations.
//!
//! # Contract
//!
//! A [`Cart`] is an insertion-ordered list of [`CartItem`]s with two
//! invariants that every operation preserves:
//!
//! - no two items share a [`ProductId`]
//! - every item's quantity is at least 1
//!
//! All four mutation operations are total: operating on an id the cart does
//! not hold is a silent no-op, never an error. Items are only ever removed
//! explicitly via [`Cart::remove`]; decrementing a quantity of 1 does
//! nothing.
//!
//! The cart is a plain value with no interior mutability. Sharing it across
//! views (and handing out read snapshots via `Clone`) is the caller's
//! concern; see `potted-storefront`'s `state` module.

use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{CurrencyCode, Price, ProductId};

/// One product entry in the cart with an associated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The catalog product, carried through opaquely.
    pub product: Product,
    /// How many units of the product are in the cart. Always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// The line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.product.price.amount * rust_decimal::Decimal::from(self.quantity),
            self.product.price.currency_code,
        )
    }
}

/// The shopping cart: an insertion-ordered list of items, unique by
/// product id.
///
/// Starts empty and is mutated only through [`add`](Self::add),
/// [`increase`](Self::increase), [`decrease`](Self::decrease) and
/// [`remove`](Self::remove).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a product to the cart with quantity 1.
    ///
    /// If the cart already holds an item with the product's id this is a
    /// no-op: repeat adds are idempotent and never merge quantities. Use
    /// [`increase`](Self::increase) to raise the quantity of an item that
    /// is already in the cart.
    pub fn add(&mut self, product: Product) {
        if !self.contains(product.id) {
            self.items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    /// Increment the quantity of the item with `id` by 1.
    ///
    /// No upper bound is enforced. No-op if the id is not in the cart.
    pub fn increase(&mut self, id: ProductId) {
        if let Some(item) = self.item_mut(id) {
            item.quantity += 1;
        }
    }

    /// Decrement the quantity of the item with `id` by 1, stopping at 1.
    ///
    /// Items are never auto-removed by decrement; removal is explicit only
    /// via [`remove`](Self::remove). No-op if the id is not in the cart.
    pub fn decrease(&mut self, id: ProductId) {
        if let Some(item) = self.item_mut(id)
            && item.quantity > 1
        {
            item.quantity -= 1;
        }
    }

    /// Remove the item with `id` from the cart.
    ///
    /// No-op if the id is not in the cart.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.product.id != id);
    }

    /// The items in the cart, in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds an item with `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.product.id == id)
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    ///
    /// The catalog is single-currency; the subtotal takes its currency from
    /// the first item and falls back to the default for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::default(), |item| {
                item.product.price.currency_code
            });
        let amount = self
            .items
            .iter()
            .map(|item| item.line_total().amount)
            .sum();
        Price::new(amount, currency)
    }

    fn item_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.product.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, title: &str, cents: i64) -> Product {
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
    fn test_add_puts_item_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));

        assert_eq!(cart.len(), 1);
        let item = cart.items().first().expect("one item");
        assert_eq!(item.product.id, ProductId::new(1));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_repeat_add_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.add(product(1, "Monstera Deliciosa", 3800));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().expect("one item").quantity, 1);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(2, "Snake Plant", 2400));
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.add(product(3, "Golden Pothos", 1800));

        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_increase_and_decrease_adjust_quantity() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.increase(ProductId::new(1));
        cart.increase(ProductId::new(1));
        cart.decrease(ProductId::new(1));

        assert_eq!(cart.items().first().expect("one item").quantity, 2);
    }

    #[test]
    fn test_decrease_never_goes_below_one() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.decrease(ProductId::new(1));
        cart.decrease(ProductId::new(1));

        assert_eq!(cart.items().first().expect("one item").quantity, 1);
        assert!(cart.contains(ProductId::new(1)));
    }

    #[test]
    fn test_operations_on_absent_id_leave_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        let before = cart.clone();

        let ghost = ProductId::new(99);
        cart.increase(ghost);
        cart.decrease(ghost);
        cart.remove(ghost);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_deletes_only_the_named_item() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.add(product(2, "Snake Plant", 2400));
        cart.remove(ProductId::new(1));

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.items().first().expect("one item").product.id,
            ProductId::new(2)
        );
    }

    #[test]
    fn test_removed_item_behaves_as_never_added() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.increase(ProductId::new(1));
        cart.remove(ProductId::new(1));

        // Further operations on the removed id are no-ops on an empty cart
        cart.increase(ProductId::new(1));
        cart.decrease(ProductId::new(1));
        assert!(cart.is_empty());

        // A fresh add starts over at quantity 1
        cart.add(product(1, "Monstera Deliciosa", 3800));
        assert_eq!(cart.items().first().expect("one item").quantity, 1);
    }

    #[test]
    fn test_total_quantity_sums_across_items() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.add(product(2, "Snake Plant", 2400));
        cart.increase(ProductId::new(2));

        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.add(product(2, "Snake Plant", 2400));
        cart.increase(ProductId::new(2));

        // 38.00 + 2 * 24.00
        assert_eq!(
            cart.subtotal(),
            Price::from_cents(8600, CurrencyCode::USD)
        );
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal().to_string(), "$0.00");
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add(product(1, "Monstera Deliciosa", 3800));
        cart.increase(ProductId::new(1));
        cart.increase(ProductId::new(1));

        let item = cart.items().first().expect("one item");
        assert_eq!(item.line_total(), Price::from_cents(11400, CurrencyCode::USD));
    }
}
