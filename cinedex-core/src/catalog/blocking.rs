//! Blocking call form over the async [`CatalogClient`] contract.
//!
//! There is exactly one network implementation per operation; this adapter
//! only drives it to completion on a private current-thread runtime. It must
//! not be used from inside an async context.

use cinedex_model::{CatalogPage, MovieDetail, MovieId};
use tokio::runtime::{Builder, Runtime};

use super::{CatalogClient, CatalogError};

#[derive(Debug)]
pub struct BlockingCatalog<C> {
    inner: C,
    runtime: Runtime,
}

impl<C: CatalogClient> BlockingCatalog<C> {
    pub fn new(inner: C) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    pub fn fetch_popular(&self) -> Result<CatalogPage, CatalogError> {
        self.runtime.block_on(self.inner.fetch_popular())
    }

    pub fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        self.runtime.block_on(self.inner.search(query))
    }

    pub fn fetch_detail(&self, id: MovieId) -> Result<MovieDetail, CatalogError> {
        self.runtime.block_on(self.inner.fetch_detail(id))
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}
