//! Bookmarked movies.
//!
//! The set is loaded once at construction and persisted as a single JSON
//! list after every mutation. Insertion order is preserved and ids are
//! unique within the set.

use cinedex_model::{MovieId, MovieSummary};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::{self, KeyValueStore, StoreError};

/// Key of the favorites list in the key/value store.
pub const FAVORITES_KEY: &str = "favorite_movies";

#[derive(Debug)]
pub struct Favorites {
    store: Arc<dyn KeyValueStore>,
    movies: RwLock<Vec<MovieSummary>>,
    // Held across copy, persist and publish so writes land in mutation order.
    persist: Mutex<()>,
}

impl Favorites {
    /// Load the persisted set. A missing or unreadable blob starts empty.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let movies = match store::read_json::<Vec<MovieSummary>>(store.as_ref(), FAVORITES_KEY).await {
            Ok(Some(movies)) => dedup_by_id(movies),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("failed to load favorites: {err}");
                Vec::new()
            }
        };
        tracing::debug!("loaded {} favorites", movies.len());

        Self {
            store,
            movies: RwLock::new(movies),
            persist: Mutex::new(()),
        }
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.movies.read().iter().any(|m| m.id == id)
    }

    /// Snapshot in insertion order.
    pub fn list(&self) -> Vec<MovieSummary> {
        self.movies.read().clone()
    }

    pub fn len(&self) -> usize {
        self.movies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.read().is_empty()
    }

    /// Append `movie` unless its id is already present. Returns whether it was added.
    pub async fn add(&self, movie: MovieSummary) -> Result<bool, StoreError> {
        self.mutate(|movies| {
            if movies.iter().any(|m| m.id == movie.id) {
                false
            } else {
                movies.push(movie);
                true
            }
        })
        .await
    }

    /// Returns whether an entry was removed.
    pub async fn remove(&self, id: MovieId) -> Result<bool, StoreError> {
        self.mutate(|movies| {
            let before = movies.len();
            movies.retain(|m| m.id != id);
            movies.len() != before
        })
        .await
    }

    /// Flip membership of `movie`. Returns `true` when it is a favorite afterwards.
    pub async fn toggle(&self, movie: MovieSummary) -> Result<bool, StoreError> {
        self.mutate(|movies| {
            if let Some(pos) = movies.iter().position(|m| m.id == movie.id) {
                movies.remove(pos);
                false
            } else {
                movies.push(movie);
                true
            }
        })
        .await
    }

    /// Apply `f` to a copy, persist the copy, and only then publish it. A
    /// failed write leaves both memory and storage on the previous list.
    async fn mutate<R>(&self, f: impl FnOnce(&mut Vec<MovieSummary>) -> R) -> Result<R, StoreError> {
        let _persist = self.persist.lock().await;
        let mut next = self.movies.read().clone();
        let result = f(&mut next);

        if let Err(err) = store::write_json(self.store.as_ref(), FAVORITES_KEY, &next).await {
            tracing::warn!("failed to persist favorites: {err}");
            return Err(err);
        }
        *self.movies.write() = next;
        Ok(result)
    }
}

fn dedup_by_id(movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut unique: Vec<MovieSummary> = Vec::with_capacity(movies.len());
    for movie in movies {
        if !unique.iter().any(|m| m.id == movie.id) {
            unique.push(movie);
        }
    }
    unique
}
