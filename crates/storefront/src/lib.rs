//! FoodExpress storefront library.
//!
//! The public menu, cart and checkout plus the `/admin` back office, served
//! from one process over a JSON-blob store. Exposed as a library so the CLI
//! and the integration tests can reuse the store and the router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
