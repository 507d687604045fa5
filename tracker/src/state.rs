//! The proposal tracking state machine.
//!
//! [`ProposalTrackingState`] is the observable aggregate consumers read;
//! [`TrackerEngine`] owns it and applies poll outcomes to it. The engine is
//! deterministic: given the same sequence of events it produces the same
//! states and the same [`PollControl`] directives. All I/O, timers, and
//! session bookkeeping live in the service layer; this module is pure
//! state-machine logic.

use {
    crate::{
        status::ProposalStatus,
        types::{MultisigConfig, ProposalSnapshot, TrackedProposal},
    },
    log::*,
    solana_pubkey::Pubkey,
};

// ---------------------------------------------------------------------------
// Tracking state
// ---------------------------------------------------------------------------

/// Everything currently known about the tracked proposal.
///
/// `threshold` and `members` are sticky: they reflect the last successful
/// read of the multisig config and survive failed re-reads. Both reset
/// when a new tracking session begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalTrackingState {
    /// The proposal being watched, or `None` when idle.
    pub proposal: Option<TrackedProposal>,
    /// Current lifecycle status, including the client-only pseudo-states.
    pub status: ProposalStatus,
    /// Members that approved, as last read.
    pub approvals: Vec<Pubkey>,
    /// Members that rejected, as last read.
    pub rejections: Vec<Pubkey>,
    /// Approvals required for execution, as last successfully read.
    pub threshold: u64,
    /// The multisig member set, as last successfully read.
    pub members: Vec<Pubkey>,
    /// Last read or action error, as a display-ready message.
    pub last_error: Option<String>,
}

impl Default for ProposalTrackingState {
    fn default() -> Self {
        Self {
            proposal: None,
            status: ProposalStatus::Loading,
            approvals: Vec::new(),
            rejections: Vec::new(),
            threshold: 0,
            members: Vec::new(),
            last_error: None,
        }
    }
}

impl ProposalTrackingState {
    /// True while a proposal is being watched.
    pub fn is_tracking(&self) -> bool {
        self.proposal.is_some()
    }

    /// Whether `address` already appears among the approvals.
    pub fn has_approved(&self, address: &Pubkey) -> bool {
        self.approvals.contains(address)
    }

    /// Whether `address` is a member of the governing multisig, per the
    /// last successful config read.
    pub fn is_member(&self, address: &Pubkey) -> bool {
        self.members.contains(address)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// What the poll loop should do after applying a poll outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollControl {
    /// Keep polling at the configured cadence.
    Continue,
    /// The proposal was observed in `Executed` for the first time: run the
    /// execution hook, wait out the grace window, then auto-dismiss.
    ExecutionObserved,
    /// Polling is over (`Rejected`/`Cancelled`, or `Executed` already
    /// handled). The state stays visible until explicitly dismissed.
    Halt,
}

/// Applies poll outcomes to the tracking state.
///
/// The engine carries one flag outside the observable state: whether
/// execution has already been observed, so the execution hook fires
/// exactly once even when several polls see `Executed`.
#[derive(Debug, Clone, Default)]
pub struct TrackerEngine {
    /// The observable aggregate.
    state: ProposalTrackingState,
    /// Set by the first poll that observes `Executed`.
    execution_observed: bool,
}

impl TrackerEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tracking state.
    pub fn state(&self) -> &ProposalTrackingState {
        &self.state
    }

    /// True while a proposal is being watched.
    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    /// Begin watching `proposal`, discarding whatever was tracked before.
    ///
    /// Resets the whole aggregate: status back to `Loading`, approval and
    /// member sets emptied, threshold back to unknown (0).
    pub fn begin_tracking(&mut self, proposal: TrackedProposal) {
        info!(
            "Tracking proposal #{} on multisig {}",
            proposal.transaction_index, proposal.multisig
        );
        self.state = ProposalTrackingState {
            proposal: Some(proposal),
            ..ProposalTrackingState::default()
        };
        self.execution_observed = false;
    }

    /// Drop the tracked proposal and return to the idle shape.
    ///
    /// Releases the stored execution hook with the proposal. Idempotent.
    pub fn clear(&mut self) {
        if let Some(proposal) = self.state.proposal.as_ref() {
            debug!(
                "Clearing tracking for proposal #{}",
                proposal.transaction_index
            );
        }
        self.state = ProposalTrackingState::default();
        self.execution_observed = false;
    }

    /// Apply a successful proposal read.
    ///
    /// Maps the raw status tag, replaces the approval/rejection sets, and
    /// clears `last_error`. An unparseable tag is treated like any other
    /// read failure: `last_error` is set and the previous status stands.
    pub fn on_proposal_read(&mut self, snapshot: ProposalSnapshot) -> PollControl {
        let status = match ProposalStatus::from_raw_tag(&snapshot.status_tag) {
            Ok(status) => status,
            Err(err) => return self.on_read_error(err.to_string()),
        };

        if self.state.status != status {
            info!("Proposal status {} -> {}", self.state.status, status);
        }
        self.state.status = status;
        self.state.approvals = snapshot.approved_by;
        self.state.rejections = snapshot.rejected_by;
        self.state.last_error = None;

        match status {
            ProposalStatus::Executed => {
                if self.execution_observed {
                    PollControl::Halt
                } else {
                    self.execution_observed = true;
                    PollControl::ExecutionObserved
                }
            }
            ProposalStatus::Rejected | ProposalStatus::Cancelled => PollControl::Halt,
            _ => PollControl::Continue,
        }
    }

    /// Apply a "proposal account does not exist" read.
    ///
    /// Expected right after proposing; surfaces as the `NotFound`
    /// pseudo-state, not as an error.
    pub fn on_proposal_missing(&mut self) -> PollControl {
        debug!("Proposal account not found yet");
        self.state.status = ProposalStatus::NotFound;
        self.state.last_error = None;
        PollControl::Continue
    }

    /// Apply a failed proposal read.
    ///
    /// Records the message and keeps the previous status: a stale status
    /// beats flickering to an unknown one.
    pub fn on_read_error(&mut self, message: impl Into<String>) -> PollControl {
        let message = message.into();
        warn!("Proposal read failed: {message}");
        self.state.last_error = Some(message);
        PollControl::Continue
    }

    /// Apply a successful multisig config read.
    ///
    /// The service layer calls this only on success; a failed config read
    /// is simply not applied, which is what keeps `threshold` and
    /// `members` sticky.
    pub fn on_config_read(&mut self, config: MultisigConfig) {
        self.state.threshold = config.threshold;
        self.state.members = config.members;
    }

    /// Record a failed approve/execute submission.
    ///
    /// Status is untouched; only polls move it.
    pub fn record_action_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Action failed: {message}");
        self.state.last_error = Some(message);
    }
}
