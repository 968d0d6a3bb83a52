//! Content store for uploaded resume bytes, keyed by a generated identifier.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

pub mod local;
pub mod s3;

pub use local::LocalContentStore;
pub use s3::S3ContentStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object store error: {0}")]
    ObjectStore(String),
}

/// Carried in `AppState` as `Arc<dyn ContentStore>`.
///
/// A missing object is a soft condition: `get` returns `None` and `delete`
/// succeeds. Writes are not atomic with the matching database insert, so
/// either side may be missing after a crash.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Fresh key for an upload: a random UUID plus the original extension.
/// Nothing else from the user-supplied filename is kept.
pub fn generate_key(original_filename: &str) -> String {
    let id = Uuid::new_v4();
    match file_extension(original_filename) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Keys this service hands out never contain separators or traversal.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && !key.contains("..")
}

fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    let valid = !stem.is_empty()
        && (1..=8).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_lowercase())
}
