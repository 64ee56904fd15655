//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation dispatches an intent to the shared [`CartStore`] and
//! renders from the snapshot the store returns; the handlers hold no cart
//! state of their own.
//!
//! The store's operations are total: posting an id the cart does not hold
//! is a no-op and still renders the (unchanged) snapshot. Only `/cart/add`
//! can fail, because it must resolve the posted id against the catalog to
//! obtain the product attributes.
//!
//! [`CartStore`]: crate::state::CartStore

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use potted_core::{Cart, CartItem, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub handle: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().to_string(),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.as_i32(),
            handle: item.product.handle.clone(),
            title: item.product.title.clone(),
            quantity: item.quantity,
            price: item.product.price.to_string(),
            line_price: item.line_total().to_string(),
            image: item.product.image.clone(),
        }
    }
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Form data for every cart mutation; carries the target product id.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Render the cart items fragment with an HTMX trigger so the count badge
/// refreshes alongside it.
fn cart_items_response(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.cart().snapshot();
    CartShowTemplate {
        cart: CartView::from(&snapshot),
    }
}

/// Add a product to the cart (HTMX).
///
/// Resolves the posted id against the catalog; an unknown id is a 404.
/// Repeat adds of a product already in the cart are idempotent.
/// Returns the count badge with an HTMX trigger to update other fragments.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Result<Response, AppError> {
    let product = state
        .catalog()
        .by_id(form.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let cart = state.cart().add(product);

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_quantity(),
        },
    )
        .into_response())
}

/// Increment an item's quantity (HTMX).
#[instrument(skip(state))]
pub async fn increase(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Response {
    if !state.cart().snapshot().contains(form.product_id) {
        tracing::debug!(product_id = %form.product_id, "increase on id not in cart");
    }
    let cart = state.cart().increase(form.product_id);
    cart_items_response(&cart)
}

/// Decrement an item's quantity (HTMX).
///
/// Quantity never drops below 1; removal is explicit via `/cart/remove`.
#[instrument(skip(state))]
pub async fn decrease(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Response {
    if !state.cart().snapshot().contains(form.product_id) {
        tracing::debug!(product_id = %form.product_id, "decrease on id not in cart");
    }
    let cart = state.cart().decrease(form.product_id);
    cart_items_response(&cart)
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<CartItemForm>,
) -> Response {
    let cart = state.cart().remove(form.product_id);
    cart_items_response(&cart)
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().snapshot().total_quantity(),
    }
}

#[cfg(test)]
mod tests {
    use potted_core::{CurrencyCode, Price, Product};

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
    fn test_cart_view_from_snapshot() {
        let mut cart = Cart::new();
        cart.add(plant(1, "Monstera Deliciosa", 3800));
        cart.add(plant(2, "Snake Plant", 2400));
        cart.increase(ProductId::new(2));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$86.00");
        assert_eq!(view.items.len(), 2);

        let snake = view.items.last().expect("two items");
        assert_eq!(snake.quantity, 2);
        assert_eq!(snake.price, "$24.00");
        assert_eq!(snake.line_price, "$48.00");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, "$0.00");
        assert!(view.items.is_empty());
    }
}
