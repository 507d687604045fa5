//! Error types for the tracking service layer.

use {crate::signer::SignerError, thiserror::Error};

/// Errors returned by the approve/execute action gateway.
///
/// Precondition failures (`NotConnected`, `ActionInProgress`,
/// `IneligibleAction`) are returned before any network call is made.
/// `Signer` failures happen during submission; they reset the in-flight
/// flag and never touch the tracked status — status truth comes only from
/// polls.
#[derive(Error, Debug)]
pub enum ActionError {
    /// No wallet is connected; nothing can sign the action.
    #[error("no wallet connected")]
    NotConnected,

    /// Another approve/execute call is already in flight.
    #[error("another action is already in progress")]
    ActionInProgress,

    /// The eligibility re-check failed at call time.
    #[error("action not allowed: {reason}")]
    IneligibleAction {
        /// Human-readable explanation of the failed precondition.
        reason: String,
    },

    /// The wallet signer rejected or failed to submit the transaction.
    #[error("submission failed: {0}")]
    Signer(#[from] SignerError),
}

/// Convenience result type for action gateway operations.
pub type Result<T> = std::result::Result<T, ActionError>;
