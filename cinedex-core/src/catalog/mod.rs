//! Movie catalog client.

pub mod blocking;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod tmdb;

use async_trait::async_trait;
use cinedex_model::{CatalogPage, MovieDetail, MovieId};
use std::fmt::Debug;

pub use blocking::BlockingCatalog;
pub use error::CatalogError;
pub use tmdb::{TMDB_API_BASE, TmdbCatalogClient};

/// Typed requests against the remote catalog.
///
/// Every operation either yields the decoded value or a classified
/// [`CatalogError`]. Implementations perform no side effects beyond the
/// network call and apply no retries.
#[async_trait]
pub trait CatalogClient: Send + Sync + Debug {
    /// First page of the popular/discover listing.
    async fn fetch_popular(&self) -> Result<CatalogPage, CatalogError>;

    /// First page of results for a free-text title search.
    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError>;

    /// Full record for a single movie.
    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetail, CatalogError>;
}

#[async_trait]
impl<T> CatalogClient for std::sync::Arc<T>
where
    T: CatalogClient + ?Sized,
{
    async fn fetch_popular(&self) -> Result<CatalogPage, CatalogError> {
        (**self).fetch_popular().await
    }

    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        (**self).search(query).await
    }

    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetail, CatalogError> {
        (**self).fetch_detail(id).await
    }
}
