//! Observable tracking state store.
//!
//! Holds the [`TrackerEngine`] behind a lock and fans every state change
//! out to subscribers. No business logic lives here: the engine decides
//! what a poll outcome means, the store only serializes mutations and
//! notifies.

use {
    parking_lot::RwLock,
    quorum_tracker::state::{ProposalTrackingState, TrackerEngine},
    tokio::sync::mpsc,
};

/// The single source of truth for "what proposal am I watching and what
/// do I currently know about it."
///
/// Every mutation goes through [`TrackingStore::update`], which holds the
/// write lock for the duration of the closure, then clones the resulting
/// state and pushes it to every live subscriber. Subscribers whose
/// receiver was dropped are pruned on the next update.
pub struct TrackingStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    engine: TrackerEngine,
    subscribers: Vec<mpsc::UnboundedSender<ProposalTrackingState>>,
}

impl Default for TrackingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingStore {
    /// Create a store in the idle shape (nothing tracked, `Loading`).
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                engine: TrackerEngine::new(),
                subscribers: Vec::new(),
            }),
        }
    }

    /// Clone of the current tracking state.
    pub fn snapshot(&self) -> ProposalTrackingState {
        self.inner.read().engine.state().clone()
    }

    /// True while a proposal is being watched.
    pub fn is_tracking(&self) -> bool {
        self.inner.read().engine.is_tracking()
    }

    /// Subscribe to state changes.
    ///
    /// The current snapshot is delivered immediately, then one snapshot
    /// per update. The channel is unbounded; the consumer is a UI that
    /// drains promptly.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ProposalTrackingState> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.write();
        // Send may only fail if `rx` is dropped before we return it.
        let _ = tx.send(inner.engine.state().clone());
        inner.subscribers.push(tx);
        rx
    }

    /// Apply `f` to the engine under the write lock and notify
    /// subscribers of the resulting state.
    pub fn update<R>(&self, f: impl FnOnce(&mut TrackerEngine) -> R) -> R {
        let mut inner = self.inner.write();
        let result = f(&mut inner.engine);
        let state = inner.engine.state().clone();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(state.clone()).is_ok());
        result
    }
}
