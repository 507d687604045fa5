//! The tracking service: poll loop, session lifecycle, teardown.
//!
//! [`TrackerService`] owns the pure [`TrackerEngine`] (via the
//! [`TrackingStore`]) and translates its [`PollControl`] directives into
//! actual I/O: reads through the injected [`ProposalReader`], timer
//! scheduling, the execution hook, and the grace-delayed auto-dismiss.
//!
//! # Data flow
//!
//! ```text
//! track_proposal ──▶ poll loop task ──▶ ProposalReader
//!                        │                   │
//!                        ▼                   ▼
//!                  TrackingStore ◀── apply_for_session (generation gate)
//!                        │
//!                        ▼
//!                   subscribers
//! ```
//!
//! # Session generations
//!
//! Every tracking session gets a generation number. All state mutations
//! produced by polls are applied through [`TrackerService`]'s
//! `apply_for_session`, which re-checks the current generation under the
//! store's write lock. Starting a new session (or dismissing) bumps the
//! generation first, so a read that was in flight when the session ended
//! is discarded when it resolves. Cancellation is cooperative: in-flight
//! reads are never aborted, their results are ignored on arrival.

use {
    crate::{
        reader::{ProposalReader, ReadError},
        signer::WalletSigner,
        store::TrackingStore,
    },
    log::*,
    parking_lot::Mutex,
    quorum_tracker::{
        config::TrackerConfig,
        state::{PollControl, ProposalTrackingState},
        types::TrackedProposal,
    },
    solana_pubkey::Pubkey,
    std::sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    tokio::{sync::mpsc, task::JoinHandle, time::sleep},
};

/// Dedupe state for the poll loop.
///
/// `in_flight` is held while a poll is running; a poll requested while
/// one is in flight (a forced poll after an action racing a timer tick)
/// sets `requested` instead, and the running poll runs one follow-up
/// round before releasing the flag. Forced polls are therefore the same
/// as timer ticks, never a privileged bypass.
#[derive(Default)]
struct PollGate {
    in_flight: bool,
    requested: bool,
}

pub(crate) struct ServiceInner {
    pub(crate) config: TrackerConfig,
    pub(crate) reader: Arc<dyn ProposalReader>,
    pub(crate) signer: Arc<dyn WalletSigner>,
    pub(crate) store: TrackingStore,
    /// Current session generation. Bumped before any session change.
    pub(crate) session: AtomicU64,
    /// Single in-flight action slot for approve/execute.
    pub(crate) is_acting: AtomicBool,
    poll_gate: Mutex<PollGate>,
    loop_task: Mutex<Option<JoinHandle<()>>>,
    dismiss_task: Mutex<Option<JoinHandle<()>>>,
}

/// Tracks one multisig proposal at a time through its lifecycle.
///
/// Cheaply cloneable; clones share the same session. Constructed
/// explicitly and handed to consumers — there is no ambient global.
#[derive(Clone)]
pub struct TrackerService {
    pub(crate) inner: Arc<ServiceInner>,
}

impl TrackerService {
    /// Create a service around the given collaborators.
    ///
    /// `config` should have been validated by the caller; the service
    /// uses it as-is.
    pub fn new(
        config: TrackerConfig,
        reader: Arc<dyn ProposalReader>,
        signer: Arc<dyn WalletSigner>,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                config,
                reader,
                signer,
                store: TrackingStore::new(),
                session: AtomicU64::new(0),
                is_acting: AtomicBool::new(false),
                poll_gate: Mutex::new(PollGate::default()),
                loop_task: Mutex::new(None),
                dismiss_task: Mutex::new(None),
            }),
        }
    }

    // -- Public API --

    /// Snapshot of the current tracking state.
    pub fn tracking_state(&self) -> ProposalTrackingState {
        self.inner.store.snapshot()
    }

    /// Subscribe to tracking state changes. The current snapshot is
    /// delivered immediately.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ProposalTrackingState> {
        self.inner.store.subscribe()
    }

    /// True while a proposal is being watched.
    pub fn is_tracking(&self) -> bool {
        self.inner.store.is_tracking()
    }

    /// Begin tracking `proposal`, superseding any current session.
    ///
    /// The old session's loop is torn down before the state is reset, and
    /// the generation bump guarantees its in-flight reads are discarded.
    /// The first poll runs immediately; recurring polls follow every
    /// configured interval. Must be called within a Tokio runtime.
    pub fn track_proposal(&self, proposal: TrackedProposal) {
        info!(
            "TrackerService: tracking proposal #{} on multisig {}",
            proposal.transaction_index, proposal.multisig
        );
        let generation = self.begin_session();
        self.inner
            .store
            .update(|engine| engine.begin_tracking(proposal));

        let service = self.clone();
        let handle = tokio::spawn(async move {
            service.run_poll_loop(generation).await;
        });
        *self.inner.loop_task.lock() = Some(handle);
    }

    /// Stop tracking and reset to the idle shape.
    ///
    /// Cancels the loop and any pending auto-dismiss, and releases the
    /// stored callback reference with the proposal. Idempotent.
    pub fn dismiss(&self) {
        debug!("TrackerService: dismiss");
        self.begin_session();
        self.inner.store.update(|engine| engine.clear());
    }

    // -- Session management --

    /// Bump the generation and tear down the previous session's tasks.
    ///
    /// The bump happens first: any read still in flight belongs to the
    /// old generation and will be discarded by `apply_for_session`.
    fn begin_session(&self) -> u64 {
        let generation = self
            .inner
            .session
            .fetch_add(1, Ordering::SeqCst)
            .saturating_add(1);
        if let Some(handle) = self.inner.loop_task.lock().take() {
            handle.abort();
        }
        if let Some(handle) = self.inner.dismiss_task.lock().take() {
            handle.abort();
        }
        let mut gate = self.inner.poll_gate.lock();
        gate.in_flight = false;
        gate.requested = false;
        generation
    }

    fn current_generation(&self) -> u64 {
        self.inner.session.load(Ordering::SeqCst)
    }

    /// Apply `f` to the engine only if `generation` is still current,
    /// checked under the store's write lock. Returns `None` when the
    /// result belonged to a superseded session.
    pub(crate) fn apply_for_session<R>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut quorum_tracker::state::TrackerEngine) -> R,
    ) -> Option<R> {
        self.inner.store.update(|engine| {
            if self.inner.session.load(Ordering::SeqCst) != generation {
                debug!("TrackerService: discarding result from stale session {generation}");
                return None;
            }
            Some(f(engine))
        })
    }

    // -- Poll loop --

    async fn run_poll_loop(&self, generation: u64) {
        loop {
            match self.poll_once(generation).await {
                PollControl::Continue => sleep(self.inner.config.poll_interval()).await,
                PollControl::ExecutionObserved => {
                    self.on_execution_observed(generation).await;
                    break;
                }
                PollControl::Halt => {
                    debug!("TrackerService: poll loop finished");
                    break;
                }
            }
        }
    }

    /// Run one poll, deduplicating overlapping requests.
    ///
    /// If a poll is already in flight the request is coalesced: the
    /// running poll performs one follow-up round before releasing the
    /// gate, and this call returns `Continue`.
    pub(crate) async fn poll_once(&self, generation: u64) -> PollControl {
        {
            let mut gate = self.inner.poll_gate.lock();
            if gate.in_flight {
                gate.requested = true;
                return PollControl::Continue;
            }
            gate.in_flight = true;
        }

        let mut control;
        loop {
            control = self.poll_round(generation).await;
            let mut gate = self.inner.poll_gate.lock();
            if gate.requested && control == PollControl::Continue {
                gate.requested = false;
                continue;
            }
            gate.in_flight = false;
            break;
        }
        control
    }

    /// One read-and-apply round.
    async fn poll_round(&self, generation: u64) -> PollControl {
        let Some((multisig, transaction_index)) = self.tracked_identity() else {
            return PollControl::Halt;
        };

        let proposal_result = self
            .inner
            .reader
            .read_proposal(&multisig, transaction_index)
            .await;
        // Best-effort secondary read; failure must not fail the poll, so
        // a failed result is simply not applied and the previous
        // threshold/member values stay in place.
        let config_result = self.inner.reader.read_multisig_config(&multisig).await;

        self.apply_for_session(generation, move |engine| {
            if let Ok(config) = config_result {
                engine.on_config_read(config);
            }
            match proposal_result {
                Ok(snapshot) => engine.on_proposal_read(snapshot),
                Err(ReadError::NotFound) => engine.on_proposal_missing(),
                Err(err) => engine.on_read_error(err.to_string()),
            }
        })
        .unwrap_or(PollControl::Halt)
    }

    fn tracked_identity(&self) -> Option<(Pubkey, u64)> {
        let state = self.inner.store.snapshot();
        state
            .proposal
            .as_ref()
            .map(|proposal| (proposal.multisig, proposal.transaction_index))
    }

    // -- Termination --

    /// Handle the first observation of `Executed`: run the hook, then
    /// schedule the grace-delayed auto-dismiss.
    pub(crate) async fn on_execution_observed(&self, generation: u64) {
        info!("TrackerService: proposal executed");
        let callback = {
            let state = self.inner.store.snapshot();
            if self.current_generation() != generation {
                return;
            }
            state
                .proposal
                .as_ref()
                .and_then(|proposal| proposal.on_executed.clone())
        };
        if let Some(callback) = callback {
            callback().await;
        }

        let service = self.clone();
        let grace = self.inner.config.dismiss_grace();
        let handle = tokio::spawn(async move {
            sleep(grace).await;
            if service.current_generation() == generation {
                debug!("TrackerService: auto-dismiss after grace window");
                service.dismiss();
            }
        });
        *self.inner.dismiss_task.lock() = Some(handle);
    }
}
