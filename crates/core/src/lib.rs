//! FoodExpress Core - Shared types library.
//!
//! This crate provides the domain types used across all FoodExpress components:
//! - `storefront` - Menu, cart, checkout and the `/admin` back office
//! - `cli` - Command-line tools for seeding and reporting
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP. Cart line matching and order pricing live here so they can be
//! tested without a running store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money and order statuses
//! - [`models`] - Catalog, order and delivery records
//! - [`cart`] - Cart lines, line identity and subtotals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod models;
pub mod types;

pub use cart::{Cart, CartItem, LineKey, MAX_LINE_QUANTITY, subtotal};
pub use models::*;
pub use types::*;
