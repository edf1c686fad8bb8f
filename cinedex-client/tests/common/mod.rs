//! Shared fixtures for the view-model tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cinedex_client::{ListState, MovieListModel, SEARCH_DEBOUNCE};
use cinedex_core::catalog::mock::MockCatalog;
use cinedex_core::model::MovieSummary;
use cinedex_core::{CatalogClient, KeyValueStore, MemoryStore, OfflineCache, StoreError};
use parking_lot::Mutex;

/// A list model wired to a scripted catalog and an in-memory cache, with
/// every committed transition recorded.
pub struct ListHarness {
    pub catalog: Arc<MockCatalog>,
    pub store: Arc<dyn KeyValueStore>,
    pub cache: OfflineCache,
    pub model: MovieListModel,
    pub transitions: Arc<Mutex<Vec<ListState>>>,
}

impl ListHarness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = Arc::new(MockCatalog::new());
        let cache = OfflineCache::new(Arc::clone(&store));
        let model = MovieListModel::spawn(
            Arc::clone(&catalog) as Arc<dyn CatalogClient>,
            cache.clone(),
            SEARCH_DEBOUNCE,
        );

        let transitions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&transitions);
        model.subscribe(move |state: &ListState| sink.lock().push(state.clone()));

        Self {
            catalog,
            store,
            cache,
            model,
            transitions,
        }
    }

    pub fn transitions(&self) -> Vec<ListState> {
        self.transitions.lock().clone()
    }
}

pub fn movies(entries: &[(u64, &str)]) -> Vec<MovieSummary> {
    MockCatalog::page(entries).items
}

/// Let the (paused) clock run past one debounce window.
pub async fn settle() {
    tokio::time::sleep(SEARCH_DEBOUNCE + Duration::from_millis(100)).await;
}

/// Memory store whose first write stalls for `delay`.
#[derive(Debug)]
pub struct SlowFirstWriteStore {
    inner: MemoryStore,
    delay: Duration,
    stalled: AtomicBool,
}

impl SlowFirstWriteStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
            stalled: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowFirstWriteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if !self.stalled.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}

/// Store that reads as empty and rejects every write.
#[derive(Debug, Default)]
pub struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("read-only store")))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("read-only store")))
    }
}
