//! Quorum multisig proposal lifecycle engine.
//!
//! This crate implements the deterministic core of the proposal tracker:
//! after a transaction is proposed to an M-of-N multisig instead of being
//! executed directly, the proposal moves through
//!
//! Draft → Active → Approved → Executing → Executed
//!
//! or ends early in Rejected/Cancelled. The engine applies poll outcomes
//! to the observable tracking state and tells the caller whether to keep
//! polling; the view module derives everything consumers render.
//!
//! # Key properties
//!
//! - **Deterministic**: the same sequence of poll outcomes always yields
//!   the same states and directives. All I/O, timers, and session
//!   bookkeeping live in the service layer (`quorum-service`).
//! - **Sticky config reads**: threshold and member set only move on
//!   successful multisig reads; a failed re-read never zeroes them.
//! - **Exactly-once execution hook**: the engine hands out
//!   `ExecutionObserved` a single time per session, no matter how many
//!   polls see `Executed`.
//! - **Poll-owned status**: nothing in this crate mutates status from an
//!   action; only applied reads move it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               TrackerEngine                  │
//! │  ┌────────────────────────────────────────┐  │
//! │  │        ProposalTrackingState           │  │
//! │  │ proposal, status, approvals,           │  │
//! │  │ rejections, threshold, members, error  │  │
//! │  └────────────────────────────────────────┘  │
//! │  ┌──────────┐  ┌─────────┐  ┌────────────┐  │
//! │  │ Status   │  │ Config  │  │ View model │  │
//! │  │ model    │  │         │  │ (pure)     │  │
//! │  └──────────┘  └─────────┘  └────────────┘  │
//! └──────────────────────────────────────────────┘
//!        ▲ poll outcomes            │ PollControl
//!        │ (from the service)       ▼ (to the service)
//! ```

pub mod config;
pub mod state;
pub mod status;
pub mod types;
pub mod view;

// Re-exports for convenience
pub use config::{ConfigError, TrackerConfig};
pub use state::{PollControl, ProposalTrackingState, TrackerEngine};
pub use status::{ProposalStatus, StatusParseError};
pub use types::{
    ExecutedCallback, MultisigConfig, ProposalSnapshot, SubmitOutcome, TrackedProposal,
};
pub use view::{
    approval_countdown, status_badge, step_state, step_states, terminal_notice,
    ApprovalCountdown, BadgeStyle, StatusBadge, StepState, TerminalNotice, TrackerStep,
};
