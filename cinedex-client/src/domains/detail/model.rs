use cinedex_core::CatalogClient;
use cinedex_model::MovieId;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::types::DetailState;
use crate::state::{Observable, SubscriptionId};

/// Detail session for one movie id.
///
/// Same `Idle -> Loading -> Loaded | Failed` shape as the list, without a
/// query dimension and without offline fallback. [`ensure_loaded`] is the
/// first-observation hook: it fetches only from `Idle`. [`load`] always
/// re-fetches. After [`close`] in-flight results are dropped and no new
/// fetch starts.
///
/// [`ensure_loaded`]: MovieDetailModel::ensure_loaded
/// [`load`]: MovieDetailModel::load
/// [`close`]: MovieDetailModel::close
#[derive(Debug)]
pub struct MovieDetailModel {
    id: MovieId,
    catalog: Arc<dyn CatalogClient>,
    state: Observable<DetailState>,
    epoch: AtomicU64,
    closed: AtomicBool,
}

impl MovieDetailModel {
    pub fn new(id: MovieId, catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            id,
            catalog,
            state: Observable::new(DetailState::Idle),
            epoch: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn state(&self) -> DetailState {
        self.state.get()
    }

    pub fn subscribe(
        &self,
        observer: impl Fn(&DetailState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Fetch if nothing has been requested yet. Returns whether a fetch ran.
    pub async fn ensure_loaded(&self) -> bool {
        match self.begin(true) {
            Some(epoch) => {
                self.fetch(epoch).await;
                true
            }
            None => false,
        }
    }

    pub async fn load(&self) {
        if let Some(epoch) = self.begin(false) {
            self.fetch(epoch).await;
        }
    }

    pub fn close(&self) {
        self.state.update(|_| {
            self.closed.store(true, Ordering::SeqCst);
            self.epoch.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    fn begin(&self, only_from_idle: bool) -> Option<u64> {
        let mut epoch = None;
        self.state.update(|state| {
            if self.closed.load(Ordering::SeqCst) {
                return false;
            }
            if only_from_idle && !matches!(state, DetailState::Idle) {
                return false;
            }
            epoch = Some(self.epoch.fetch_add(1, Ordering::SeqCst) + 1);
            *state = DetailState::Loading;
            true
        });
        epoch
    }

    async fn fetch(&self, epoch: u64) {
        log::debug!("detail request {epoch} for movie {}", self.id);
        let next = match self.catalog.fetch_detail(self.id).await {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(err) => {
                log::warn!("detail request for movie {} failed: {err}", self.id);
                DetailState::Failed(err.user_message())
            }
        };

        let committed = self.state.update(|state| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            *state = next;
            true
        });
        if !committed {
            log::debug!("discarding stale detail result {epoch} for movie {}", self.id);
        }
    }
}
