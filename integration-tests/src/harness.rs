//! Quorum test harness.
//!
//! Provides a simulated chain and wallet for integration-testing the
//! proposal tracker end to end:
//!
//! - `MultisigSim` — in-memory proposal/multisig accounts the test can
//!   mutate between polls (external approvals, status transitions,
//!   read failures)
//! - `SimReader` — a [`ProposalReader`] backed by the simulator
//! - `SimSigner` — a [`WalletSigner`] that applies approvals/executions
//!   to the simulator, with optional scripted failures and holds
//! - `TrackerHarness` — wires the above into a [`TrackerService`] with
//!   short dev delays
//!
//! The harness does NOT talk to any network; every test drives the
//! simulator directly and observes the tracker through its public API.

use {
    async_trait::async_trait,
    parking_lot::Mutex,
    quorum_service::{
        reader::{ProposalReader, ReadError},
        signer::{SignerError, WalletSigner},
        TrackerService,
    },
    quorum_tracker::{
        config::TrackerConfig,
        types::{MultisigConfig, ProposalSnapshot, TrackedProposal},
    },
    solana_pubkey::Pubkey,
    solana_signature::Signature,
    std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    },
    tokio::sync::Notify,
};

// ─── Constants ───────────────────────────────────────────────────────────────

/// Default approval threshold for simulated multisigs.
pub const DEFAULT_THRESHOLD: u64 = 2;

/// Default member count for simulated multisigs.
pub const DEFAULT_MEMBER_COUNT: usize = 3;

// ─── Chain simulator ─────────────────────────────────────────────────────────

/// One simulated proposal account.
#[derive(Debug, Clone)]
pub struct SimProposal {
    /// Raw on-chain status tag ("Draft" … "Cancelled").
    pub status_tag: String,
    /// Members that approved so far.
    pub approved_by: Vec<Pubkey>,
    /// Members that rejected so far.
    pub rejected_by: Vec<Pubkey>,
    /// False until the account is "indexed"; reads return `NotFound`.
    pub exists: bool,
}

#[derive(Debug, Clone)]
struct SimMultisig {
    threshold: u64,
    members: Vec<Pubkey>,
    proposals: HashMap<u64, SimProposal>,
}

/// In-memory multisig/proposal accounts the tests mutate between polls.
#[derive(Default)]
pub struct MultisigSim {
    multisigs: Mutex<HashMap<Pubkey, SimMultisig>>,
    /// When set, proposal reads fail with this RPC message.
    read_failure: Mutex<Option<String>>,
    /// When true, multisig config reads fail (proposal reads unaffected).
    config_failure: Mutex<bool>,
}

impl MultisigSim {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a multisig with the given members; returns its address.
    pub fn add_multisig(&self, threshold: u64, members: Vec<Pubkey>) -> Pubkey {
        let address = Pubkey::new_unique();
        self.multisigs.lock().insert(
            address,
            SimMultisig {
                threshold,
                members,
                proposals: HashMap::new(),
            },
        );
        address
    }

    /// Create a proposal under `multisig`. Starts unindexed (`NotFound`
    /// on read) in `Active`; call [`Self::index_proposal`] to make it
    /// visible.
    pub fn add_proposal(&self, multisig: &Pubkey, transaction_index: u64) {
        let mut multisigs = self.multisigs.lock();
        if let Some(entry) = multisigs.get_mut(multisig) {
            entry.proposals.insert(
                transaction_index,
                SimProposal {
                    status_tag: "Active".to_string(),
                    approved_by: vec![],
                    rejected_by: vec![],
                    exists: false,
                },
            );
        }
    }

    /// Mark the proposal account as indexed so reads start succeeding.
    pub fn index_proposal(&self, multisig: &Pubkey, transaction_index: u64) {
        self.with_proposal(multisig, transaction_index, |proposal| {
            proposal.exists = true;
        });
    }

    /// Set the proposal's raw status tag.
    pub fn set_status(&self, multisig: &Pubkey, transaction_index: u64, tag: &str) {
        self.with_proposal(multisig, transaction_index, |proposal| {
            proposal.status_tag = tag.to_string();
        });
    }

    /// Record an approval, advancing to `Approved` at threshold the way
    /// the chain would.
    pub fn approve(&self, multisig: &Pubkey, transaction_index: u64, member: Pubkey) {
        let threshold = self
            .multisigs
            .lock()
            .get(multisig)
            .map(|entry| entry.threshold)
            .unwrap_or(0);
        self.with_proposal(multisig, transaction_index, |proposal| {
            if !proposal.approved_by.contains(&member) {
                proposal.approved_by.push(member);
            }
            if threshold > 0 && proposal.approved_by.len() as u64 >= threshold {
                proposal.status_tag = "Approved".to_string();
            }
        });
    }

    /// Make every subsequent proposal read fail with an RPC error.
    pub fn fail_reads(&self, message: &str) {
        *self.read_failure.lock() = Some(message.to_string());
    }

    /// Restore successful proposal reads.
    pub fn restore_reads(&self) {
        *self.read_failure.lock() = None;
    }

    /// Toggle multisig config read failure.
    pub fn set_config_failure(&self, fail: bool) {
        *self.config_failure.lock() = fail;
    }

    fn with_proposal(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
        f: impl FnOnce(&mut SimProposal),
    ) {
        let mut multisigs = self.multisigs.lock();
        if let Some(proposal) = multisigs
            .get_mut(multisig)
            .and_then(|entry| entry.proposals.get_mut(&transaction_index))
        {
            f(proposal);
        }
    }
}

// ─── Reader ──────────────────────────────────────────────────────────────────

/// [`ProposalReader`] backed by the simulator. Counts reads so tests can
/// assert how many polls ran.
pub struct SimReader {
    sim: Arc<MultisigSim>,
    /// Total proposal reads served (including failures).
    pub proposal_reads: AtomicUsize,
}

impl SimReader {
    pub fn new(sim: Arc<MultisigSim>) -> Self {
        Self {
            sim,
            proposal_reads: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProposalReader for SimReader {
    async fn read_proposal(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
    ) -> Result<ProposalSnapshot, ReadError> {
        self.proposal_reads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.sim.read_failure.lock().clone() {
            return Err(ReadError::Rpc { message });
        }
        let multisigs = self.sim.multisigs.lock();
        let proposal = multisigs
            .get(multisig)
            .and_then(|entry| entry.proposals.get(&transaction_index))
            .filter(|proposal| proposal.exists)
            .ok_or(ReadError::NotFound)?;
        Ok(ProposalSnapshot {
            status_tag: proposal.status_tag.clone(),
            approved_by: proposal.approved_by.clone(),
            rejected_by: proposal.rejected_by.clone(),
        })
    }

    async fn read_multisig_config(&self, multisig: &Pubkey) -> Result<MultisigConfig, ReadError> {
        if *self.sim.config_failure.lock() {
            return Err(ReadError::Rpc {
                message: "config read failed".to_string(),
            });
        }
        let multisigs = self.sim.multisigs.lock();
        let entry = multisigs.get(multisig).ok_or(ReadError::NotFound)?;
        Ok(MultisigConfig {
            threshold: entry.threshold,
            members: entry.members.clone(),
        })
    }
}

// ─── Signer ──────────────────────────────────────────────────────────────────

/// [`WalletSigner`] that applies actions to the simulator.
pub struct SimSigner {
    sim: Arc<MultisigSim>,
    address: Mutex<Option<Pubkey>>,
    /// Total approve+execute submissions attempted.
    pub submissions: AtomicUsize,
    /// When set, the next submission fails with this error.
    pub fail_next: Mutex<Option<SignerError>>,
    /// When set, submissions block until notified (overlap tests).
    pub hold: Mutex<Option<Arc<Notify>>>,
}

impl SimSigner {
    pub fn new(sim: Arc<MultisigSim>, address: Option<Pubkey>) -> Self {
        Self {
            sim,
            address: Mutex::new(address),
            submissions: AtomicUsize::new(0),
            fail_next: Mutex::new(None),
            hold: Mutex::new(None),
        }
    }

    /// Connect or disconnect the wallet mid-test.
    pub fn set_address(&self, address: Option<Pubkey>) {
        *self.address.lock() = address;
    }

    async fn submit_gate(&self) -> Result<Pubkey, SignerError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        let hold = self.hold.lock().clone();
        if let Some(hold) = hold {
            hold.notified().await;
        }
        if let Some(err) = self.fail_next.lock().take() {
            return Err(err);
        }
        (*self.address.lock()).ok_or(SignerError::UserRejected)
    }
}

#[async_trait]
impl WalletSigner for SimSigner {
    fn address(&self) -> Option<Pubkey> {
        *self.address.lock()
    }

    async fn approve(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
    ) -> Result<Signature, SignerError> {
        let address = self.submit_gate().await?;
        self.sim.approve(multisig, transaction_index, address);
        Ok(Signature::default())
    }

    async fn execute(
        &self,
        multisig: &Pubkey,
        transaction_index: u64,
    ) -> Result<Signature, SignerError> {
        self.submit_gate().await?;
        self.sim.set_status(multisig, transaction_index, "Executing");
        Ok(Signature::default())
    }
}

// ─── Harness ─────────────────────────────────────────────────────────────────

/// A tracker wired to a simulated chain and wallet.
///
/// The connected wallet is `member`; `other_members` can approve
/// "externally" via the simulator.
pub struct TrackerHarness {
    pub service: TrackerService,
    pub sim: Arc<MultisigSim>,
    pub reader: Arc<SimReader>,
    pub signer: Arc<SimSigner>,
    pub multisig: Pubkey,
    pub member: Pubkey,
    pub other_members: Vec<Pubkey>,
}

impl Default for TrackerHarness {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MEMBER_COUNT)
    }
}

impl TrackerHarness {
    /// Create a harness with one multisig of `member_count` members and
    /// the given threshold; the connected wallet is the first member.
    pub fn new(threshold: u64, member_count: usize) -> Self {
        let sim = MultisigSim::new();
        let members: Vec<Pubkey> = (0..member_count).map(|_| Pubkey::new_unique()).collect();
        let member = members[0];
        let other_members = members[1..].to_vec();
        let multisig = sim.add_multisig(threshold, members);

        let reader = Arc::new(SimReader::new(sim.clone()));
        let signer = Arc::new(SimSigner::new(sim.clone(), Some(member)));
        let service = TrackerService::new(
            TrackerConfig::dev_default(),
            reader.clone(),
            signer.clone(),
        );

        Self {
            service,
            sim,
            reader,
            signer,
            multisig,
            member,
            other_members,
        }
    }

    /// Create a proposal on the simulator (already indexed) and return
    /// the descriptor to track.
    pub fn make_proposal(&self, transaction_index: u64, memo: &str) -> TrackedProposal {
        self.sim.add_proposal(&self.multisig, transaction_index);
        self.sim.index_proposal(&self.multisig, transaction_index);
        TrackedProposal::new(self.multisig, transaction_index, memo, Signature::default())
    }

    /// Like [`Self::make_proposal`] but not yet indexed: reads return
    /// `NotFound` until [`MultisigSim::index_proposal`] is called.
    pub fn make_unindexed_proposal(&self, transaction_index: u64, memo: &str) -> TrackedProposal {
        self.sim.add_proposal(&self.multisig, transaction_index);
        TrackedProposal::new(self.multisig, transaction_index, memo, Signature::default())
    }
}
