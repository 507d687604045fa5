//! Wallet signer seam.
//!
//! Signs and submits the approve/execute instructions on behalf of the
//! connected member. The tracker never inspects the produced
//! transactions; it only needs the submission signature and the failure
//! taxonomy.

use {
    async_trait::async_trait, solana_pubkey::Pubkey, solana_signature::Signature,
    thiserror::Error,
};

/// Errors reported by a [`WalletSigner`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The user declined the signing request in their wallet.
    #[error("user rejected the request")]
    UserRejected,

    /// The signed transaction could not be submitted.
    #[error("network error: {message}")]
    Network {
        /// Human-readable failure description.
        message: String,
    },
}

/// Signs and submits member actions against a multisig proposal.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address of the connected wallet, or `None` when no wallet is
    /// connected.
    fn address(&self) -> Option<Pubkey>;

    /// Submit an approval for the given proposal.
    async fn approve(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
    ) -> Result<Signature, SignerError>;

    /// Submit the execution of the given proposal.
    async fn execute(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
    ) -> Result<Signature, SignerError>;
}
