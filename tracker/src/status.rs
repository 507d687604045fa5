//! Proposal lifecycle statuses and their classification.
//!
//! Single source of truth for mapping raw on-chain status tags to
//! [`ProposalStatus`] and for deciding which statuses are terminal versus
//! which should keep the poll loop running.

use thiserror::Error;

/// Lifecycle status of a tracked multisig proposal.
///
/// The first seven variants mirror the tags carried by the on-chain
/// proposal account. `Loading` and `NotFound` are client-only
/// pseudo-states: `Loading` before the first successful read, `NotFound`
/// when the read succeeded in telling us the account does not exist yet —
/// expected right after proposing, before indexing catches up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    /// Created but not yet opened for member approval.
    Draft,
    /// Open for member approvals.
    Active,
    /// Reached the approval threshold; awaiting execution.
    Approved,
    /// Execution transaction is in flight on-chain.
    Executing,
    /// Executed on-chain. Terminal.
    Executed,
    /// Rejected by the members. Terminal.
    Rejected,
    /// Cancelled before execution. Terminal.
    Cancelled,
    /// No successful read yet (client-only).
    Loading,
    /// Proposal account not found on-chain yet (client-only).
    NotFound,
}

/// Error parsing a raw on-chain status tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusParseError {
    #[error("unrecognized proposal status tag: {tag}")]
    UnknownTag { tag: String },
}

impl ProposalStatus {
    /// Map a raw on-chain status tag to a [`ProposalStatus`].
    ///
    /// Only the seven on-chain tags parse; the client-only pseudo-states
    /// never come off the wire.
    pub fn from_raw_tag(tag: &str) -> Result<Self, StatusParseError> {
        match tag {
            "Draft" => Ok(ProposalStatus::Draft),
            "Active" => Ok(ProposalStatus::Active),
            "Approved" => Ok(ProposalStatus::Approved),
            "Executing" => Ok(ProposalStatus::Executing),
            "Executed" => Ok(ProposalStatus::Executed),
            "Rejected" => Ok(ProposalStatus::Rejected),
            "Cancelled" => Ok(ProposalStatus::Cancelled),
            _ => Err(StatusParseError::UnknownTag {
                tag: tag.to_string(),
            }),
        }
    }

    /// True when the proposal can no longer change state on-chain.
    ///
    /// Terminal statuses end the poll loop: `Executed`, `Rejected`,
    /// `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProposalStatus::Executed | ProposalStatus::Rejected | ProposalStatus::Cancelled
        )
    }

    /// True when no further approvals are needed and the proposal is
    /// awaiting (or undergoing) execution: `Approved` or `Executing`.
    pub fn is_approval_complete(self) -> bool {
        matches!(self, ProposalStatus::Approved | ProposalStatus::Executing)
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProposalStatus::Draft => write!(f, "Draft"),
            ProposalStatus::Active => write!(f, "Active"),
            ProposalStatus::Approved => write!(f, "Approved"),
            ProposalStatus::Executing => write!(f, "Executing"),
            ProposalStatus::Executed => write!(f, "Executed"),
            ProposalStatus::Rejected => write!(f, "Rejected"),
            ProposalStatus::Cancelled => write!(f, "Cancelled"),
            ProposalStatus::Loading => write!(f, "Loading"),
            ProposalStatus::NotFound => write!(f, "NotFound"),
        }
    }
}
