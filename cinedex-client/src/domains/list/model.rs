//! List state machine.
//!
//! ```text
//! Idle -> Loading -> Loaded | Failed
//! Loaded | Failed -> Loading            (next query or manual refresh)
//! ```
//!
//! Each effective query bumps the request epoch and commits `Loading`. A
//! completion only commits when its epoch is still current, so a slow answer
//! for a superseded query can never overwrite a newer one. The transport
//! call itself is not cancelled.
//!
//! On success `Loaded(items)` is committed, then the items are written to
//! the offline cache (wholesale overwrite). Cache writes of one session are
//! serialized and re-check the epoch once they hold the write lock, so the
//! slot always ends up with the newest committed list. On failure
//! `Failed(message)` is committed, then the cache is read once: a non-empty
//! cached list replaces the failure with `Loaded(cached)`.

use cinedex_core::{CatalogClient, CatalogError, OfflineCache};
use cinedex_model::MovieSummary;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::types::ListState;
use crate::domains::search::SearchDebouncer;
use crate::state::{Observable, SubscriptionId};

/// One list view session.
///
/// [`MovieListModel::open`] starts with the popular listing, like a freshly
/// shown search screen. [`MovieListModel::spawn`] waits for the first search
/// text instead. Dropping the model (or calling [`MovieListModel::close`])
/// invalidates every in-flight request and rejects later ones.
#[derive(Debug)]
pub struct MovieListModel {
    shared: Arc<ListShared>,
    debouncer: SearchDebouncer,
    driver: JoinHandle<()>,
}

#[derive(Debug)]
struct ListShared {
    catalog: Arc<dyn CatalogClient>,
    cache: OfflineCache,
    state: Observable<ListState>,
    epoch: AtomicU64,
    closed: AtomicBool,
    query: Mutex<String>,
    cache_write: tokio::sync::Mutex<()>,
}

impl MovieListModel {
    /// Create the session and start its debounce and dispatch tasks on the
    /// current Tokio runtime.
    pub fn spawn(catalog: Arc<dyn CatalogClient>, cache: OfflineCache, debounce: Duration) -> Self {
        let shared = Arc::new(ListShared {
            catalog,
            cache,
            state: Observable::new(ListState::Idle),
            epoch: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            query: Mutex::new(String::new()),
            cache_write: tokio::sync::Mutex::new(()),
        });

        let (debouncer, mut queries) = SearchDebouncer::spawn(debounce);
        let dispatch = Arc::clone(&shared);
        let driver = tokio::spawn(async move {
            while let Some(query) = queries.recv().await {
                let shared = Arc::clone(&dispatch);
                tokio::spawn(async move { shared.run_query(query).await });
            }
        });

        Self {
            shared,
            debouncer,
            driver,
        }
    }

    /// [`MovieListModel::spawn`], then queue the empty query so the popular
    /// listing loads once the debounce window passes.
    pub fn open(catalog: Arc<dyn CatalogClient>, cache: OfflineCache, debounce: Duration) -> Self {
        let model = Self::spawn(catalog, cache, debounce);
        model.set_search_text("");
        model
    }

    /// Raw search text from the input field; throttled by the debouncer.
    pub fn set_search_text(&self, text: impl Into<String>) {
        if self.is_closed() {
            return;
        }
        self.debouncer.push(text);
    }

    /// Apply an effective query immediately, bypassing the debouncer.
    /// Resolves once this request has completed (or been superseded).
    pub async fn apply_query(&self, query: impl Into<String>) {
        self.shared.run_query(query.into()).await;
    }

    /// Re-issue the current query (pull-to-refresh).
    pub async fn refresh(&self) {
        let query = self.current_query();
        log::debug!("manual refresh for {query:?}");
        self.shared.run_query(query).await;
    }

    pub fn state(&self) -> ListState {
        self.shared.state.get()
    }

    /// Last query that reached the catalog stage.
    pub fn current_query(&self) -> String {
        self.shared.query.lock().clone()
    }

    pub fn subscribe(
        &self,
        observer: impl Fn(&ListState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.shared.state.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.state.unsubscribe(id)
    }

    /// End the session: discard any in-flight result and turn later
    /// `apply_query`/`refresh`/`set_search_text` calls into no-ops.
    pub fn close(&self) {
        self.shared.close();
        self.driver.abort();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }
}

impl Drop for MovieListModel {
    fn drop(&mut self) {
        self.close();
    }
}

impl ListShared {
    async fn run_query(&self, query: String) {
        let Some(epoch) = self.begin(&query) else {
            log::debug!("list session closed; ignoring query {query:?}");
            return;
        };

        let outcome = if query.is_empty() {
            self.catalog.fetch_popular().await
        } else {
            self.catalog.search(&query).await
        };

        match outcome {
            Ok(page) => self.finish_success(epoch, page.items).await,
            Err(err) => self.finish_failure(epoch, err).await,
        }
    }

    fn begin(&self, query: &str) -> Option<u64> {
        let mut epoch = None;
        self.state.update(|state| {
            if self.closed.load(Ordering::SeqCst) {
                return false;
            }
            let next = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            epoch = Some(next);
            *self.query.lock() = query.to_string();
            *state = ListState::Loading;
            true
        });
        if let Some(epoch) = epoch {
            log::debug!("list request {epoch} started for {query:?}");
        }
        epoch
    }

    async fn finish_success(&self, epoch: u64, items: Vec<MovieSummary>) {
        if !self.commit(epoch, ListState::Loaded(items.clone())) {
            self.log_stale(epoch);
            return;
        }

        let _write = self.cache_write.lock().await;
        if !self.is_current(epoch) {
            log::debug!("skipping cache write for superseded list request {epoch}");
            return;
        }
        if let Err(err) = self.cache.store(&items).await {
            log::warn!("failed to cache list results: {err}");
        }
    }

    async fn finish_failure(&self, epoch: u64, err: CatalogError) {
        log::warn!("list request {epoch} failed: {err}");
        if !self.commit(epoch, ListState::Failed(err.user_message())) {
            self.log_stale(epoch);
            return;
        }

        let cached = self.cache.load().await;
        if cached.is_empty() {
            return;
        }
        log::info!("recovering list from offline cache ({} movies)", cached.len());
        if !self.commit(epoch, ListState::Loaded(cached)) {
            self.log_stale(epoch);
        }
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn commit(&self, epoch: u64, next: ListState) -> bool {
        self.state.update(|state| {
            if !self.is_current(epoch) {
                return false;
            }
            *state = next;
            true
        })
    }

    fn close(&self) {
        self.state.update(|_| {
            self.closed.store(true, Ordering::SeqCst);
            self.epoch.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    fn log_stale(&self, epoch: u64) {
        log::debug!(
            "discarding result of list request {epoch}; current is {}",
            self.epoch.load(Ordering::SeqCst)
        );
    }
}
