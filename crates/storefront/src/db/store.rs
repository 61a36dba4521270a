//! The in-memory data store.
//!
//! All collections live in one [`StoreData`] behind a single
//! `tokio::sync::RwLock`. Repositories take the write lock for the whole
//! read-modify-write of an operation, so mutations never interleave. After a
//! mutation the touched collections are written back to the blob store;
//! write failures are logged and the in-memory state stays authoritative.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use foodexpress_core::{Cart, Category, Complement, DeliveryFee, Order, Product};

use super::blob::{self, BlobError, BlobKey, BlobStore, MemoryBlobStore};
use super::seed;

/// Every collection the application owns.
#[derive(Debug, Clone, Default)]
pub struct StoreData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub complements: Vec<Complement>,
    pub delivery_fees: Vec<DeliveryFee>,
    pub orders: Vec<Order>,
    pub cart: Cart,
}

impl StoreData {
    /// The built-in seed data.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            categories: seed::categories(),
            products: seed::products(),
            complements: seed::complements(),
            delivery_fees: seed::delivery_fees(),
            orders: seed::orders(),
            cart: seed::cart(),
        }
    }

    /// Write one collection to `blobs`.
    ///
    /// # Errors
    ///
    /// Returns `BlobError` if encoding or writing fails.
    pub fn save(&self, blobs: &dyn BlobStore, key: BlobKey) -> Result<(), BlobError> {
        match key {
            BlobKey::Products => blob::save(blobs, key, &self.products),
            BlobKey::Orders => blob::save(blobs, key, &self.orders),
            BlobKey::DeliveryFees => blob::save(blobs, key, &self.delivery_fees),
            BlobKey::Cart => blob::save(blobs, key, &self.cart),
            BlobKey::Categories => blob::save(blobs, key, &self.categories),
            BlobKey::Complements => blob::save(blobs, key, &self.complements),
        }
    }
}

/// Shared store handle.
pub struct Store {
    data: RwLock<StoreData>,
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Load every collection from `blobs`.
    ///
    /// A blob that was never written falls back to the seed data. A blob that
    /// cannot be read or decoded is logged and also falls back to seed data.
    #[must_use]
    pub fn open(blobs: Arc<dyn BlobStore>) -> Self {
        let data = StoreData {
            categories: load_or_seed(blobs.as_ref(), BlobKey::Categories, seed::categories),
            products: load_or_seed(blobs.as_ref(), BlobKey::Products, seed::products),
            complements: load_or_seed(blobs.as_ref(), BlobKey::Complements, seed::complements),
            delivery_fees: load_or_seed(blobs.as_ref(), BlobKey::DeliveryFees, seed::delivery_fees),
            orders: load_or_seed(blobs.as_ref(), BlobKey::Orders, seed::orders),
            cart: load_or_seed(blobs.as_ref(), BlobKey::Cart, seed::cart),
        };

        tracing::info!(
            categories = data.categories.len(),
            products = data.products.len(),
            complements = data.complements.len(),
            delivery_fees = data.delivery_fees.len(),
            orders = data.orders.len(),
            cart_lines = data.cart.len(),
            "Store loaded"
        );

        Self {
            data: RwLock::new(data),
            blobs,
        }
    }

    /// A store seeded with the built-in data and backed by memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryBlobStore::new()))
    }

    /// The backing blob store.
    #[must_use]
    pub fn blobs(&self) -> &dyn BlobStore {
        self.blobs.as_ref()
    }

    /// Check the backing blob store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `BlobError` if it is not.
    pub fn ping(&self) -> Result<(), BlobError> {
        self.blobs.ping()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.data.write().await
    }

    /// Best-effort write-back of the given collections, one blob at a time.
    ///
    /// Blob writes are synchronous and run under the caller's write lock, so
    /// write-backs land in mutation order. A slow data directory stalls the
    /// calling worker for the length of the write.
    pub(crate) fn persist(&self, data: &StoreData, keys: &[BlobKey]) {
        for &key in keys {
            if let Err(e) = data.save(self.blobs.as_ref(), key) {
                tracing::warn!(blob = %key, error = %e, "Failed to persist blob");
            }
        }
    }
}

fn load_or_seed<T, F>(blobs: &dyn BlobStore, key: BlobKey, seed: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match blob::load(blobs, key) {
        Ok(Some(value)) => value,
        Ok(None) => seed(),
        Err(e) => {
            tracing::error!(blob = %key, error = %e, "Failed to load blob, using seed data");
            seed()
        }
    }
}
