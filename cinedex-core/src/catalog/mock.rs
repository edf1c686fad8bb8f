#![allow(missing_docs)]
//! Scripted [`CatalogClient`] for tests.
//!
//! Responses are queued per operation kind and replayed in call order, each
//! optionally after a delay. Every call is recorded before its delay elapses,
//! so tests can assert on what was requested even for superseded calls.

use async_trait::async_trait;
use cinedex_model::{CatalogPage, MovieDetail, MovieId, MovieSummary};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use super::{CatalogClient, CatalogError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    Popular,
    Search(String),
    Detail(MovieId),
}

#[derive(Debug)]
struct Scripted<T> {
    delay: Duration,
    outcome: Result<T, CatalogError>,
}

#[derive(Debug, Default)]
pub struct MockCatalog {
    calls: Mutex<Vec<CatalogCall>>,
    pages: Mutex<VecDeque<Scripted<CatalogPage>>>,
    details: Mutex<VecDeque<Scripted<MovieDetail>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next `fetch_popular`/`search` call.
    pub fn push_page(&self, outcome: Result<CatalogPage, CatalogError>) {
        self.push_page_after(Duration::ZERO, outcome);
    }

    pub fn push_page_after(&self, delay: Duration, outcome: Result<CatalogPage, CatalogError>) {
        self.pages.lock().push_back(Scripted { delay, outcome });
    }

    /// Queue the outcome of the next `fetch_detail` call.
    pub fn push_detail(&self, outcome: Result<MovieDetail, CatalogError>) {
        self.push_detail_after(Duration::ZERO, outcome);
    }

    pub fn push_detail_after(&self, delay: Duration, outcome: Result<MovieDetail, CatalogError>) {
        self.details.lock().push_back(Scripted { delay, outcome });
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().clone()
    }

    /// Build a single-page result from `(id, title)` pairs.
    pub fn page(movies: &[(u64, &str)]) -> CatalogPage {
        let items: Vec<MovieSummary> = movies
            .iter()
            .map(|(id, title)| Self::movie(*id, title))
            .collect();
        CatalogPage {
            page_number: 1,
            total_pages: 1,
            total_items: items.len() as u64,
            items,
        }
    }

    pub fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id: MovieId(id),
            title: title.to_string(),
            synopsis: format!("Synopsis of {title}"),
            poster_path: Some(format!("/{id}.jpg")),
            release_date: Some("2023-01-01".to_string()),
            rating_average: 7.5,
        }
    }

    pub fn detail(id: u64, title: &str) -> MovieDetail {
        MovieDetail {
            summary: Self::movie(id, title),
            backdrop_path: None,
            rating_count: 100,
            runtime_minutes: Some(121),
            genres: Vec::new(),
        }
    }

    async fn replay<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Result<T, CatalogError> {
        let next = queue.lock().pop_front();
        let Some(scripted) = next else {
            return Err(CatalogError::Transport("no scripted response".into()));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.outcome
    }
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn fetch_popular(&self) -> Result<CatalogPage, CatalogError> {
        self.calls.lock().push(CatalogCall::Popular);
        Self::replay(&self.pages).await
    }

    async fn search(&self, query: &str) -> Result<CatalogPage, CatalogError> {
        self.calls.lock().push(CatalogCall::Search(query.to_string()));
        Self::replay(&self.pages).await
    }

    async fn fetch_detail(&self, id: MovieId) -> Result<MovieDetail, CatalogError> {
        self.calls.lock().push(CatalogCall::Detail(id));
        Self::replay(&self.details).await
    }
}
