//! Transaction confirmation polling.
//!
//! Upstream of tracking: after the submitter sends the proposing
//! transaction, callers wait for it to reach a confirmation level before
//! building the [`TrackedProposal`](quorum_tracker::types::TrackedProposal)
//! and starting the tracker. Polls at a fixed cadence until the target
//! level, a reported failure, or the configured deadline.

use {
    crate::reader::ReadError,
    async_trait::async_trait,
    log::*,
    quorum_tracker::config::TrackerConfig,
    solana_signature::Signature,
    thiserror::Error,
    tokio::time::{sleep, Instant},
};

/// How far a transaction has progressed through the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfirmationLevel {
    /// Processed by a node.
    Processed,
    /// Confirmed by the cluster.
    Confirmed,
    /// Finalized; will not be rolled back.
    Finalized,
}

/// Status of a submitted transaction, as reported by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Confirmation level reached so far.
    pub confirmation: ConfirmationLevel,
    /// True when the transaction landed but failed.
    pub failed: bool,
}

/// Reads the status of a submitted transaction signature.
#[async_trait]
pub trait SignatureStatusReader: Send + Sync {
    /// `Ok(None)` means the signature is not known to the network yet.
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>, ReadError>;
}

/// Errors from [`await_confirmation`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmError {
    /// The transaction landed on-chain but failed.
    #[error("transaction {signature} failed on-chain")]
    TransactionFailed {
        /// The failed transaction's signature.
        signature: Signature,
    },

    /// The deadline elapsed without reaching the target level. The
    /// transaction may still land later; the caller should point the
    /// user at an explorer.
    #[error("transaction not confirmed within {waited_ms}ms")]
    Timeout {
        /// How long we waited.
        waited_ms: u64,
    },

    /// A status read failed (not "signature unknown", which just keeps
    /// the wait going).
    #[error("status read failed: {0}")]
    Read(#[from] ReadError),
}

/// Wait until `signature` reaches `target`, polling every
/// `confirmation_interval` up to `confirmation_timeout`.
pub async fn await_confirmation(
    reader: &dyn SignatureStatusReader,
    signature: &Signature,
    target: ConfirmationLevel,
    config: &TrackerConfig,
) -> Result<SignatureStatus, ConfirmError> {
    let deadline = Instant::now()
        .checked_add(config.confirmation_timeout())
        .unwrap_or_else(Instant::now);

    loop {
        match reader.signature_status(signature).await {
            Ok(Some(status)) if status.failed => {
                warn!("Transaction {signature} failed on-chain");
                return Err(ConfirmError::TransactionFailed {
                    signature: *signature,
                });
            }
            Ok(Some(status)) if status.confirmation >= target => {
                debug!("Transaction {signature} reached {:?}", status.confirmation);
                return Ok(status);
            }
            Ok(_) | Err(ReadError::NotFound) => {
                // Not indexed yet, or below target: keep waiting.
            }
            Err(err) => return Err(ConfirmError::Read(err)),
        }

        if Instant::now() >= deadline {
            return Err(ConfirmError::Timeout {
                waited_ms: config.confirmation_timeout_ms,
            });
        }
        sleep(config.confirmation_interval()).await;
    }
}
