//! Domain records for FoodExpress.
//!
//! These are the records persisted in the named JSON blobs. Field names are
//! camelCase on the wire.

pub mod catalog;
pub mod delivery;
pub mod order;

pub use catalog::{Category, Complement, Product, ProductDetail};
pub use delivery::DeliveryFee;
pub use order::{Customer, CustomerAddress, Order};
