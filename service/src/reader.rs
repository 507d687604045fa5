//! On-chain proposal reader seam.
//!
//! The poll loop knows nothing about RPC clients or account layouts; it
//! reads through [`ProposalReader`], and hosts inject whatever
//! implementation fits their deployment (an RPC-backed reader in
//! production, a scripted one in tests).

use {
    async_trait::async_trait,
    quorum_tracker::types::{MultisigConfig, ProposalSnapshot},
    solana_pubkey::Pubkey,
    thiserror::Error,
};

/// Errors reported by a [`ProposalReader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The account does not exist (yet). Expected right after proposing,
    /// before indexing catches up; the tracker maps this to the
    /// `NotFound` pseudo-state rather than an error.
    #[error("account not found")]
    NotFound,

    /// Any other read failure (network, RPC, decode).
    #[error("rpc error: {message}")]
    Rpc {
        /// Human-readable failure description.
        message: String,
    },
}

/// Reads proposal and multisig account state from the chain.
#[async_trait]
pub trait ProposalReader: Send + Sync {
    /// Read the current state of one proposal.
    async fn read_proposal(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
    ) -> Result<ProposalSnapshot, ReadError>;

    /// Read the governing multisig's configuration (threshold and member
    /// set). Failure here never fails a whole poll; the previous values
    /// stay in place.
    async fn read_multisig_config(&self, multisig: &Pubkey) -> Result<MultisigConfig, ReadError>;
}
