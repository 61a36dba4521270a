//! Named JSON blob persistence.
//!
//! Every collection is stored as one JSON array under a fixed key. The
//! file-backed store keeps `<data_dir>/<key>.json`; the in-memory store is
//! used by tests and throwaway servers.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised at the storage boundary.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("I/O error on blob {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error on blob {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The six persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKey {
    Products,
    Orders,
    DeliveryFees,
    Cart,
    Categories,
    Complements,
}

impl BlobKey {
    pub const ALL: [Self; 6] = [
        Self::Products,
        Self::Orders,
        Self::DeliveryFees,
        Self::Cart,
        Self::Categories,
        Self::Complements,
    ];

    /// Storage key, also the file stem.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::DeliveryFees => "deliveryFees",
            Self::Cart => "cart",
            Self::Categories => "categories",
            Self::Complements => "complements",
        }
    }
}

impl std::fmt::Display for BlobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value store of raw JSON documents.
pub trait BlobStore: Send + Sync {
    /// Raw contents of `key`, or `None` when it was never written.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::Io` when the blob exists but cannot be read.
    fn read(&self, key: BlobKey) -> Result<Option<String>, BlobError>;

    /// Replace the contents of `key`.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::Io` when the blob cannot be written.
    fn write(&self, key: BlobKey, contents: &str) -> Result<(), BlobError>;

    /// Check that the backing storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::Io` when it is not.
    fn ping(&self) -> Result<(), BlobError>;
}

/// Read and decode a blob.
///
/// # Errors
///
/// Returns `BlobError` if the blob cannot be read or is not valid JSON for `T`.
pub fn load<T: DeserializeOwned>(store: &dyn BlobStore, key: BlobKey) -> Result<Option<T>, BlobError> {
    store
        .read(key)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| BlobError::Json {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

/// Encode and write a blob.
///
/// # Errors
///
/// Returns `BlobError` if encoding or writing fails.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn BlobStore,
    key: BlobKey,
    value: &T,
) -> Result<(), BlobError> {
    let raw = serde_json::to_string_pretty(value).map_err(|source| BlobError::Json {
        key: key.to_string(),
        source,
    })?;
    store.write(key, &raw)
}

// =============================================================================
// File store
// =============================================================================

/// Blobs stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path(&self, key: BlobKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    fn io_error(key: BlobKey, source: std::io::Error) -> BlobError {
        BlobError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: BlobKey) -> Result<Option<String>, BlobError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn write(&self, key: BlobKey, contents: &str) -> Result<(), BlobError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        // Write-then-rename so a crash never leaves a half-written blob.
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| Self::io_error(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| Self::io_error(key, e))
    }

    fn ping(&self) -> Result<(), BlobError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| BlobError::Io {
            key: self.dir.display().to_string(),
            source,
        })
    }
}

// =============================================================================
// Memory store
// =============================================================================

/// Blobs held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<BlobKey, String>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, HashMap<BlobKey, String>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: BlobKey) -> Result<Option<String>, BlobError> {
        Ok(self.blobs().get(&key).cloned())
    }

    fn write(&self, key: BlobKey, contents: &str) -> Result<(), BlobError> {
        self.blobs().insert(key, contents.to_string());
        Ok(())
    }

    fn ping(&self) -> Result<(), BlobError> {
        Ok(())
    }
}
