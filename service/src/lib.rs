//! Quorum proposal tracking service.
//!
//! The async layer around the pure [`quorum_tracker`] engine: the poll
//! loop, the observable state store, the member action gateway, and the
//! trait seams for the external collaborators (on-chain reader, wallet
//! signer, signature-status reader).
//!
//! # Data flow
//!
//! ```text
//! submitter ──SubmitOutcome──▶ caller ──TrackedProposal──▶ TrackerService
//!                                                              │
//!                       ┌──────────────────────────────────────┤
//!                       ▼                                      ▼
//!                 ProposalReader                          WalletSigner
//!                 (poll loop reads)                   (approve / execute)
//!                       │                                      │
//!                       ▼                                      │
//!                 TrackingStore ◀──────── forced poll ─────────┘
//!                       │
//!                       ▼
//!                  subscribers (view layer)
//! ```
//!
//! A service tracks at most one proposal at a time; starting a new
//! session supersedes the old one atomically. All failures are recovered
//! locally: the poll loop never panics into consumers, who observe
//! `last_error` as a plain string field.

pub mod actions;
pub mod confirm;
pub mod error;
pub mod reader;
pub mod service;
pub mod signer;
pub mod store;

// Re-exports for convenience
pub use confirm::{
    await_confirmation, ConfirmError, ConfirmationLevel, SignatureStatus, SignatureStatusReader,
};
pub use error::{ActionError, Result};
pub use reader::{ProposalReader, ReadError};
pub use service::TrackerService;
pub use signer::{SignerError, WalletSigner};
pub use store::TrackingStore;
