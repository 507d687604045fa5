//! Consumer-facing view model.
//!
//! Pure derivations from [`ProposalTrackingState`]: the three-step
//! progress indicator, the approval countdown, the status badge, and the
//! terminal notice. Everything here is side-effect-free and recomputed on
//! every state change; presentation layers render the returned values
//! as-is.

use {
    crate::{state::ProposalTrackingState, status::ProposalStatus},
    serde::Serialize,
};

// ---------------------------------------------------------------------------
// Step indicator
// ---------------------------------------------------------------------------

/// The three consumer-visible milestones of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackerStep {
    /// The proposal exists and is collecting approvals.
    Proposed,
    /// The approval threshold was reached.
    Approved,
    /// The underlying transaction executed.
    Executed,
}

impl TrackerStep {
    /// All steps in display order.
    pub const ALL: [TrackerStep; 3] = [
        TrackerStep::Proposed,
        TrackerStep::Approved,
        TrackerStep::Executed,
    ];

    /// Display label for the step.
    pub fn label(self) -> &'static str {
        match self {
            TrackerStep::Proposed => "Proposed",
            TrackerStep::Approved => "Approved",
            TrackerStep::Executed => "Executed",
        }
    }
}

/// Rendering state of one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepState {
    /// Milestone reached.
    Done,
    /// Milestone in progress (spinner).
    Active,
    /// Milestone not reached yet.
    Pending,
}

/// Step states for `[Proposed, Approved, Executed]`, in display order.
///
/// Rejected and cancelled proposals do not advance the milestones; the
/// [`terminal_notice`] carries that outcome instead.
pub fn step_states(status: ProposalStatus) -> [StepState; 3] {
    use StepState::*;
    match status {
        ProposalStatus::Loading
        | ProposalStatus::NotFound
        | ProposalStatus::Draft
        | ProposalStatus::Active => [Active, Pending, Pending],
        ProposalStatus::Approved | ProposalStatus::Executing => [Done, Done, Active],
        ProposalStatus::Executed => [Done, Done, Done],
        ProposalStatus::Rejected | ProposalStatus::Cancelled => [Pending, Pending, Pending],
    }
}

/// Rendering state of a single milestone.
pub fn step_state(step: TrackerStep, status: ProposalStatus) -> StepState {
    let states = step_states(status);
    match step {
        TrackerStep::Proposed => states[0],
        TrackerStep::Approved => states[1],
        TrackerStep::Executed => states[2],
    }
}

// ---------------------------------------------------------------------------
// Approval countdown
// ---------------------------------------------------------------------------

/// The approval countdown shown under the `Proposed` milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ApprovalCountdown {
    /// Threshold not known yet; render nothing.
    Hidden,
    /// Approvals still outstanding.
    Outstanding {
        /// Approvals received so far.
        received: u64,
        /// Approvals required.
        threshold: u64,
        /// Approvals still missing.
        remaining: u64,
    },
    /// No further approvals are needed.
    Complete,
}

impl ApprovalCountdown {
    /// Display text, or `None` when hidden.
    pub fn label(&self) -> Option<String> {
        match self {
            ApprovalCountdown::Hidden => None,
            ApprovalCountdown::Outstanding {
                received,
                threshold,
                ..
            } => Some(format!("{received} of {threshold} received")),
            ApprovalCountdown::Complete => Some("All required approvals received".to_string()),
        }
    }
}

/// Derive the approval countdown from the tracking state.
///
/// Complete either when the status says so (`Approved`/`Executing`) or
/// when the approval count already meets the threshold, whichever the
/// polls surface first.
pub fn approval_countdown(state: &ProposalTrackingState) -> ApprovalCountdown {
    if state.threshold == 0 {
        return ApprovalCountdown::Hidden;
    }
    let received = state.approvals.len() as u64;
    if state.status.is_approval_complete() || received >= state.threshold {
        return ApprovalCountdown::Complete;
    }
    ApprovalCountdown::Outstanding {
        received,
        threshold: state.threshold,
        remaining: state.threshold.saturating_sub(received),
    }
}

// ---------------------------------------------------------------------------
// Status badge
// ---------------------------------------------------------------------------

/// Visual weight of the status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BadgeStyle {
    Primary,
    Secondary,
    Destructive,
}

/// The status badge next to the dialog title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub style: BadgeStyle,
}

/// Badge for the given status. The two pseudo-states render as a generic
/// loading label.
pub fn status_badge(status: ProposalStatus) -> StatusBadge {
    match status {
        ProposalStatus::Loading | ProposalStatus::NotFound => StatusBadge {
            label: "Loading...",
            style: BadgeStyle::Secondary,
        },
        ProposalStatus::Draft => StatusBadge {
            label: "Draft",
            style: BadgeStyle::Secondary,
        },
        ProposalStatus::Active => StatusBadge {
            label: "Active",
            style: BadgeStyle::Secondary,
        },
        ProposalStatus::Approved => StatusBadge {
            label: "Approved",
            style: BadgeStyle::Primary,
        },
        ProposalStatus::Executing => StatusBadge {
            label: "Executing",
            style: BadgeStyle::Secondary,
        },
        ProposalStatus::Executed => StatusBadge {
            label: "Executed",
            style: BadgeStyle::Primary,
        },
        ProposalStatus::Rejected => StatusBadge {
            label: "Rejected",
            style: BadgeStyle::Destructive,
        },
        ProposalStatus::Cancelled => StatusBadge {
            label: "Cancelled",
            style: BadgeStyle::Destructive,
        },
    }
}

// ---------------------------------------------------------------------------
// Terminal notice
// ---------------------------------------------------------------------------

/// Presentation of a terminal outcome.
///
/// Rejection and cancellation are valid outcomes, not errors; they get an
/// attention-drawing notice rather than an error surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TerminalNotice {
    /// The proposal executed.
    Executed { message: &'static str },
    /// The proposal will never execute.
    NotExecuted { headline: String, detail: String },
}

/// Terminal notice for the given status, or `None` while in flight.
pub fn terminal_notice(status: ProposalStatus) -> Option<TerminalNotice> {
    match status {
        ProposalStatus::Executed => Some(TerminalNotice::Executed {
            message: "Transaction executed successfully!",
        }),
        ProposalStatus::Rejected | ProposalStatus::Cancelled => {
            Some(TerminalNotice::NotExecuted {
                headline: format!("Proposal {status}"),
                detail: format!(
                    "This proposal was {} and will not be executed.",
                    status.to_string().to_lowercase()
                ),
            })
        }
        _ => None,
    }
}
