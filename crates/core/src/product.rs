//! Catalog product attributes.
//!
//! A [`Product`] is what the catalog hands to the views and what the cart
//! carries along with a quantity. The cart treats everything except the id
//! as opaque passthrough data; only the id participates in its contract.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product in the shop catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog id. The cart's uniqueness invariant keys on this.
    pub id: ProductId,
    /// URL-safe handle (e.g., "monstera-deliciosa").
    pub handle: String,
    /// Display title (e.g., "Monstera Deliciosa").
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Path to the product image under `/static`.
    #[serde(default)]
    pub image: Option<String>,
    /// Short description shown on product cards.
    #[serde(default)]
    pub description: Option<String>,
}
