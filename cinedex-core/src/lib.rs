//! Catalog access and local persistence for cinedex.
//!
//! - [`catalog`]: typed requests against the remote movie catalog, with a
//!   single async contract ([`CatalogClient`]) and a blocking adapter.
//! - [`store`]: a flat key/value store abstraction with on-disk and
//!   in-memory back ends. Values are opaque JSON blobs.
//! - [`offline_cache`]: the single cache slot holding the last successful
//!   result list.
//! - [`favorites`]: the user's bookmarked movies, persisted after every
//!   mutation.

pub mod catalog;
pub mod favorites;
pub mod offline_cache;
pub mod store;

pub use catalog::{BlockingCatalog, CatalogClient, CatalogError, TmdbCatalogClient};
pub use favorites::Favorites;
pub use offline_cache::OfflineCache;
pub use store::{DiskStore, KeyValueStore, MemoryStore, StoreError};

/// Re-export of the model crate so consumers need a single dependency.
pub use cinedex_model as model;
