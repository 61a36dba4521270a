//! Business logic services for the storefront.
//!
//! - `auth` - Back office credential check
pub mod auth;
