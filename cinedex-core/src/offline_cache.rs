//! Last-known-good result list.
//!
//! One fixed slot, overwritten wholesale on every successful list fetch. Any
//! number of list view models may share it; concurrent writers resolve as
//! last-write-wins.

use cinedex_model::MovieSummary;
use std::sync::Arc;

use crate::store::{self, KeyValueStore, StoreError};

/// Key of the cache slot in the key/value store.
pub const OFFLINE_CACHE_KEY: &str = "cached_movies";

#[derive(Debug, Clone)]
pub struct OfflineCache {
    store: Arc<dyn KeyValueStore>,
}

impl OfflineCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Replace the cached list with `movies`.
    pub async fn store(&self, movies: &[MovieSummary]) -> Result<(), StoreError> {
        store::write_json(self.store.as_ref(), OFFLINE_CACHE_KEY, movies).await?;
        tracing::debug!("cached {} movies for offline use", movies.len());
        Ok(())
    }

    /// Cached list, or an empty list when the slot is absent or unreadable.
    pub async fn load(&self) -> Vec<MovieSummary> {
        match store::read_json::<Vec<MovieSummary>>(self.store.as_ref(), OFFLINE_CACHE_KEY).await {
            Ok(Some(movies)) => movies,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read cached movies: {err}");
                Vec::new()
            }
        }
    }

    pub async fn has_cached(&self) -> bool {
        matches!(self.store.get(OFFLINE_CACHE_KEY).await, Ok(Some(_)))
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(OFFLINE_CACHE_KEY).await
    }
}
