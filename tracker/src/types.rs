//! Core types for proposal tracking.
//!
//! Defines the tracked-proposal descriptor handed in by callers, the
//! payloads produced by the on-chain reader, and the outcome type returned
//! by the upstream transaction submitter.

use {
    futures::future::BoxFuture,
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    std::{fmt, sync::Arc},
};

/// Caller-supplied hook fired exactly once when the tracked proposal is
/// observed in the `Executed` state. The closure owns its own error
/// handling; the tracker only awaits it.
pub type ExecutedCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

// ---------------------------------------------------------------------------
// Tracked proposal
// ---------------------------------------------------------------------------

/// The intent to watch one multisig proposal through its lifecycle.
#[derive(Clone)]
pub struct TrackedProposal {
    /// Address of the governing multisig account.
    pub multisig: Pubkey,
    /// Sequence number of the proposal within that multisig.
    pub transaction_index: u64,
    /// Human-readable description of the underlying action. Display-only.
    pub memo: String,
    /// Signature of the transaction that created the proposal.
    /// Display/link only.
    pub origin_signature: Signature,
    /// Explorer deep link to the proposal, when the submitter provides one.
    pub proposal_url: Option<String>,
    /// Invoked exactly once when the proposal reaches `Executed`.
    pub on_executed: Option<ExecutedCallback>,
}

impl TrackedProposal {
    /// Create a descriptor with no explorer link and no execution hook.
    pub fn new(
        multisig: Pubkey,
        transaction_index: u64,
        memo: impl Into<String>,
        origin_signature: Signature,
    ) -> Self {
        Self {
            multisig,
            transaction_index,
            memo: memo.into(),
            origin_signature,
            proposal_url: None,
            on_executed: None,
        }
    }

    /// Attach an explorer deep link.
    pub fn with_proposal_url(mut self, url: impl Into<String>) -> Self {
        self.proposal_url = Some(url.into());
        self
    }

    /// Attach the execution hook.
    pub fn with_on_executed(mut self, callback: ExecutedCallback) -> Self {
        self.on_executed = Some(callback);
        self
    }
}

impl fmt::Debug for TrackedProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedProposal")
            .field("multisig", &self.multisig)
            .field("transaction_index", &self.transaction_index)
            .field("memo", &self.memo)
            .field("origin_signature", &self.origin_signature)
            .field("proposal_url", &self.proposal_url)
            .field("on_executed", &self.on_executed.is_some())
            .finish()
    }
}

// Callback identity is not observable; two descriptors are the same
// proposal when their identifying fields agree.
impl PartialEq for TrackedProposal {
    fn eq(&self, other: &Self) -> bool {
        self.multisig == other.multisig
            && self.transaction_index == other.transaction_index
            && self.memo == other.memo
            && self.origin_signature == other.origin_signature
            && self.proposal_url == other.proposal_url
    }
}

impl Eq for TrackedProposal {}

// ---------------------------------------------------------------------------
// Reader payloads
// ---------------------------------------------------------------------------

/// One successful read of the proposal account.
///
/// `status_tag` is the raw on-chain tag; mapping it to a
/// [`ProposalStatus`](crate::status::ProposalStatus) is the status model's
/// job, not the reader's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalSnapshot {
    /// Raw lifecycle tag as stored on-chain ("Draft" … "Cancelled").
    pub status_tag: String,
    /// Members that approved, in on-chain order.
    pub approved_by: Vec<Pubkey>,
    /// Members that rejected, in on-chain order.
    pub rejected_by: Vec<Pubkey>,
}

/// One successful read of the governing multisig account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigConfig {
    /// Minimum number of member approvals required for execution.
    pub threshold: u64,
    /// The member set.
    pub members: Vec<Pubkey>,
}

// ---------------------------------------------------------------------------
// Submitter outcome
// ---------------------------------------------------------------------------

/// What the upstream transaction submitter produced for a wallet-gated
/// mutation: either a directly executed transaction or a multisig proposal
/// that now needs member approvals. Tracking only begins for proposals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Executed immediately; nothing to track.
    Direct {
        /// Signature of the executed transaction.
        signature: Signature,
    },
    /// Proposed to a multisig instead of being executed.
    Proposal {
        /// Signature of the proposing transaction.
        signature: Signature,
        /// The governing multisig.
        multisig: Pubkey,
        /// Sequence number assigned to the proposal.
        transaction_index: u64,
        /// Explorer deep link, when known.
        proposal_url: Option<String>,
    },
}

impl SubmitOutcome {
    /// True when the mutation went through a multisig proposal.
    pub fn is_multisig(&self) -> bool {
        matches!(self, SubmitOutcome::Proposal { .. })
    }

    /// Signature of the submitted transaction.
    pub fn signature(&self) -> &Signature {
        match self {
            SubmitOutcome::Direct { signature } | SubmitOutcome::Proposal { signature, .. } => {
                signature
            }
        }
    }

    /// Build the [`TrackedProposal`] for a proposal outcome.
    ///
    /// Returns `None` for direct executions, which have nothing to track.
    pub fn into_tracked(
        self,
        memo: impl Into<String>,
        on_executed: Option<ExecutedCallback>,
    ) -> Option<TrackedProposal> {
        match self {
            SubmitOutcome::Direct { .. } => None,
            SubmitOutcome::Proposal {
                signature,
                multisig,
                transaction_index,
                proposal_url,
            } => Some(TrackedProposal {
                multisig,
                transaction_index,
                memo: memo.into(),
                origin_signature: signature,
                proposal_url,
                on_executed,
            }),
        }
    }
}
