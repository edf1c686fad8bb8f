use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

/// `cacache`-backed store rooted at a directory.
///
/// Each key maps to the most recent integrity-checked blob written under it;
/// earlier content stays in the content store until garbage collected.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "opened key/value store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl KeyValueStore for DiskStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match cacache::read(&self.root, key).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(cacache::Error::EntryNotFound(..)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let integrity = cacache::write(&self.root, key, value).await?;
        tracing::trace!(key, %integrity, bytes = value.len(), "stored blob");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        cacache::remove(&self.root, key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_overwrites_and_remove_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::open(dir.path().join("kv")).unwrap();

        store.put("slot", b"first").await.unwrap();
        store.put("slot", b"second").await.unwrap();
        assert_eq!(store.get("slot").await.unwrap().as_deref(), Some(&b"second"[..]));

        store.remove("slot").await.unwrap();
        assert_eq!(store.get("slot").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        DiskStore::open(dir.path())
            .unwrap()
            .put("favorites", b"[]")
            .await
            .unwrap();

        let reopened = DiskStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("favorites").await.unwrap().as_deref(),
            Some(&b"[]"[..])
        );
    }
}
