//! Potted Core - Shared domain types and cart state.
//!
//! This crate provides the types used across all Potted components:
//! - `storefront` - Public-facing shop site
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP, no templating. The cart lives here because it is the one piece
//! of the shop with a real contract; everything above it is view glue.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`product`] - Catalog product attributes carried into the cart
//! - [`cart`] - The cart aggregate and its four mutation operations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;

pub use cart::{Cart, CartItem};
pub use product::Product;
pub use types::*;
