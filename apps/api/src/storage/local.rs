use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, warn};

use super::{is_valid_key, ContentStore, StorageError};

/// Content store on the local file system, one file per key.
pub struct LocalContentStore {
    root: PathBuf,
}

impl LocalContentStore {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        info!("Local content store at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        is_valid_key(key).then(|| self.root.join(key))
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), StorageError> {
        let path = self.path_for(key).ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("invalid content key '{key}'"),
            ))
        })?;
        tokio::fs::write(path, &bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StorageError> {
        let Some(path) = self.path_for(key) else {
            warn!("Rejected lookup of malformed content key '{key}'");
            return Ok(None);
        };
        match tokio::fs::read(path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let Some(path) = self.path_for(key) else {
            return Ok(());
        };
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalContentStore::new(dir.path()).await.unwrap();

        store.put("abc.pdf", Bytes::from_static(b"%PDF")).await.unwrap();
        assert_eq!(
            store.get("abc.pdf").await.unwrap(),
            Some(Bytes::from_static(b"%PDF"))
        );

        store.delete("abc.pdf").await.unwrap();
        assert_eq!(store.get("abc.pdf").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_object_is_soft() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalContentStore::new(dir.path()).await.unwrap();

        assert_eq!(store.get("nope.txt").await.unwrap(), None);
        store.delete("nope.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_traversal_keys_never_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalContentStore::new(dir.path().join("uploads")).await.unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();

        assert_eq!(store.get("../secret.txt").await.unwrap(), None);
        assert!(store
            .put("../escape.txt", Bytes::from_static(b"x"))
            .await
            .is_err());
        assert!(!dir.path().join("escape.txt").exists());
    }
}
