//! Write the built-in seed data to a data directory.

use std::path::Path;

use tracing::info;

use foodexpress_storefront::db::{BlobKey, BlobStore, FileBlobStore, StoreData};

/// Write every seed blob into `data_dir`.
///
/// Without `force`, nothing is written if any blob already exists.
///
/// # Errors
///
/// Returns an error if blobs exist and `force` is off, or if a blob cannot
/// be read or written.
pub fn seed(data_dir: &Path, force: bool) -> Result<Vec<BlobKey>, Box<dyn std::error::Error>> {
    let blobs = FileBlobStore::new(data_dir);
    blobs.ping()?;

    if !force {
        let mut existing = Vec::new();
        for key in BlobKey::ALL {
            if blobs.read(key)?.is_some() {
                existing.push(key.as_str());
            }
        }
        if !existing.is_empty() {
            return Err(format!(
                "{} already exist in {} (use --force to overwrite)",
                existing.join(", "),
                data_dir.display()
            )
            .into());
        }
    }

    let data = StoreData::seed();
    for key in BlobKey::ALL {
        data.save(&blobs, key)?;
        info!(blob = %key, path = %blobs.path(key).display(), "Seeded");
    }

    Ok(BlobKey::ALL.to_vec())
}
