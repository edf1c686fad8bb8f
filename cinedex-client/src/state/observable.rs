use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

type Observer<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A value with a subscribe/notify contract.
///
/// Transitions are applied one at a time. After each committed transition
/// every registered observer is called synchronously, in registration order,
/// with a snapshot of the new value. Observers may read the value or manage
/// subscriptions, but must not commit transitions: the dispatch lock is not
/// reentrant and doing so deadlocks.
pub struct Observable<S> {
    value: Mutex<S>,
    dispatch: Mutex<()>,
    observers: Mutex<Vec<(SubscriptionId, Observer<S>)>>,
    next_id: AtomicU64,
}

impl<S: fmt::Debug> fmt::Debug for Observable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.value.lock())
            .field("observers", &self.observers.lock().len())
            .finish()
    }
}

impl<S: Clone + Default> Default for Observable<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Clone> Observable<S> {
    pub fn new(initial: S) -> Self {
        Self {
            value: Mutex::new(initial),
            dispatch: Mutex::new(()),
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> S {
        self.value.lock().clone()
    }

    pub fn subscribe(&self, observer: impl Fn(&S) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, Arc::new(observer)));
        id
    }

    /// Returns whether the subscription was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub fn set(&self, next: S) {
        self.update(|value| {
            *value = next;
            true
        });
    }

    /// Apply `transition` under the transition lock.
    ///
    /// The closure returns whether it committed a change; observers are only
    /// notified for committed transitions. Returns the closure's verdict.
    pub fn update(&self, transition: impl FnOnce(&mut S) -> bool) -> bool {
        let _dispatch = self.dispatch.lock();

        let snapshot = {
            let mut value = self.value.lock();
            if !transition(&mut value) {
                return false;
            }
            value.clone()
        };

        let observers: Vec<Observer<S>> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&snapshot);
        }
        true
    }
}
