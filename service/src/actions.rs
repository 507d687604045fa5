//! Member approve/execute actions.
//!
//! The two member-writable transitions, with eligibility and concurrency
//! guards. Actions only *submit* transactions; they never set the tracked
//! status. Truth is re-derived from the forced poll that follows a
//! successful submission.

use {
    crate::{
        error::{ActionError, Result},
        service::TrackerService,
    },
    log::*,
    quorum_tracker::{
        state::{PollControl, ProposalTrackingState},
        status::ProposalStatus,
    },
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    std::sync::atomic::Ordering,
};

impl TrackerService {
    /// True while an approve/execute call is in flight.
    pub fn is_acting(&self) -> bool {
        self.inner.is_acting.load(Ordering::SeqCst)
    }

    /// Whether the connected wallet is a member of the governing
    /// multisig, per the last successful config read.
    pub fn is_member(&self) -> bool {
        match self.inner.signer.address() {
            Some(address) => self.tracking_state().is_member(&address),
            None => false,
        }
    }

    /// Whether the connected wallet already approved.
    pub fn has_approved(&self) -> bool {
        match self.inner.signer.address() {
            Some(address) => self.tracking_state().has_approved(&address),
            None => false,
        }
    }

    /// Whether an approval by the connected wallet would be accepted.
    pub fn can_approve(&self) -> bool {
        if self.is_acting() {
            return false;
        }
        let Some(address) = self.inner.signer.address() else {
            return false;
        };
        check_can_approve(&self.tracking_state(), &address).is_ok()
    }

    /// Whether the connected wallet can trigger execution.
    pub fn can_execute(&self) -> bool {
        if self.is_acting() {
            return false;
        }
        let Some(address) = self.inner.signer.address() else {
            return false;
        };
        check_can_execute(&self.tracking_state(), &address).is_ok()
    }

    /// Submit an approval for the tracked proposal.
    ///
    /// Eligibility is re-checked at call time, not just UI-gated. On
    /// success a poll is forced immediately so the state reflects the new
    /// approval without waiting for the next interval tick. Returns the
    /// submission signature.
    pub async fn approve_proposal(&self) -> Result<Signature> {
        let address = self
            .inner
            .signer
            .address()
            .ok_or(ActionError::NotConnected)?;
        self.acquire_action_slot()?;
        let result = self
            .run_action(&address, check_can_approve, |multisig, index| async move {
                self.inner.signer.approve(&multisig, index).await
            })
            .await;
        self.inner.is_acting.store(false, Ordering::SeqCst);
        result
    }

    /// Submit the execution of the tracked proposal.
    ///
    /// Requires the proposal to have reached `Approved`; the following
    /// polls are expected to observe `Executing` then `Executed`.
    pub async fn execute_proposal(&self) -> Result<Signature> {
        let address = self
            .inner
            .signer
            .address()
            .ok_or(ActionError::NotConnected)?;
        self.acquire_action_slot()?;
        let result = self
            .run_action(&address, check_can_execute, |multisig, index| async move {
                self.inner.signer.execute(&multisig, index).await
            })
            .await;
        self.inner.is_acting.store(false, Ordering::SeqCst);
        result
    }

    /// Claim the single in-flight action slot, or fail.
    fn acquire_action_slot(&self) -> Result<()> {
        self.inner
            .is_acting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ActionError::ActionInProgress)?;
        Ok(())
    }

    /// Shared submit path: eligibility re-check, submission, forced poll.
    async fn run_action<F, Fut>(
        &self,
        address: &Pubkey,
        check: impl Fn(&ProposalTrackingState, &Pubkey) -> Result<()>,
        submit: F,
    ) -> Result<Signature>
    where
        F: FnOnce(Pubkey, u64) -> Fut,
        Fut: std::future::Future<Output = std::result::Result<Signature, crate::signer::SignerError>>,
    {
        let generation = self.inner.session.load(Ordering::SeqCst);
        let state = self.tracking_state();
        let Some(proposal) = state.proposal.as_ref() else {
            return Err(ActionError::IneligibleAction {
                reason: "no proposal is being tracked".to_string(),
            });
        };
        check(&state, address)?;

        match submit(proposal.multisig, proposal.transaction_index).await {
            Ok(signature) => {
                info!("TrackerService: action submitted ({signature})");
                let control = self.poll_once(generation).await;
                if control == PollControl::ExecutionObserved {
                    self.on_execution_observed(generation).await;
                }
                Ok(signature)
            }
            Err(err) => {
                self.apply_for_session(generation, |engine| {
                    engine.record_action_failure(err.to_string())
                });
                Err(ActionError::Signer(err))
            }
        }
    }
}

fn check_can_approve(state: &ProposalTrackingState, address: &Pubkey) -> Result<()> {
    if !state.is_member(address) {
        return Err(ActionError::IneligibleAction {
            reason: "connected wallet is not a member of the multisig".to_string(),
        });
    }
    if state.has_approved(address) {
        return Err(ActionError::IneligibleAction {
            reason: "connected wallet already approved this proposal".to_string(),
        });
    }
    match state.status {
        ProposalStatus::Draft | ProposalStatus::Active => Ok(()),
        status => Err(ActionError::IneligibleAction {
            reason: format!("proposal is {status} and no longer accepts approvals"),
        }),
    }
}

fn check_can_execute(state: &ProposalTrackingState, address: &Pubkey) -> Result<()> {
    if !state.is_member(address) {
        return Err(ActionError::IneligibleAction {
            reason: "connected wallet is not a member of the multisig".to_string(),
        });
    }
    match state.status {
        ProposalStatus::Approved => Ok(()),
        status => Err(ActionError::IneligibleAction {
            reason: format!("proposal is {status}, not ready for execution"),
        }),
    }
}
