//! Data access for the storefront and back office.
//!
//! # Storage
//!
//! There is no database: every collection lives in memory inside
//! [`Store`] and is written back to a named JSON blob after each mutation.
//!
//! ## Blobs
//!
//! - `categories` - Menu categories
//! - `products` - Menu items
//! - `complements` - Paid add-ons, optionally tied to a product
//! - `deliveryFees` - Fee per neighborhood
//! - `orders` - Placed orders
//! - `cart` - The current cart
//!
//! # Repositories
//!
//! Each repository borrows the store and owns one slice of the contract:
//! [`CatalogRepository`], [`CartRepository`], [`OrderRepository`] and
//! [`DeliveryFeeRepository`].

pub mod blob;
pub mod cart;
pub mod catalog;
pub mod delivery_fees;
pub mod orders;
pub mod seed;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use foodexpress_core::{CategoryId, ProductId};

pub use blob::{BlobError, BlobKey, BlobStore, FileBlobStore, MemoryBlobStore};
pub use cart::CartRepository;
pub use catalog::{CatalogRepository, CategoryInput, ComplementInput, ProductDeletion, ProductInput};
pub use delivery_fees::{DeliveryFeeInput, DeliveryFeeRepository};
pub use orders::{OrderRepository, OrderStats, StatusCount};
pub use store::{Store, StoreData};

/// Catalog integrity violations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product references a category that does not exist.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// A complement references a product that does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A category cannot be deleted while products reference it.
    #[error("category {id} has {count} product(s)")]
    CategoryHasProducts { id: CategoryId, count: usize },
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The record being updated or deleted does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catalog integrity violation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Open the file-backed store rooted at `data_dir`.
#[must_use]
pub fn open_store(data_dir: &Path) -> Store {
    Store::open(Arc::new(FileBlobStore::new(data_dir)))
}
