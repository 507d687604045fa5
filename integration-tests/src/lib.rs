//! Quorum Integration Tests
//!
//! End-to-end tests for the multisig proposal tracker, run against a
//! simulated chain and wallet (no network, no real multisig program).
//!
//! # Scenarios covered
//!
//! 1. **Full lifecycle** — propose → `NotFound` → `Active` → member
//!    approval (forced poll) → external approval → `Approved` → execute
//!    → `Executing` → `Executed` → callback → auto-dismiss
//! 2. **Terminal outcomes** — rejected/cancelled proposals halt polling
//!    and wait for an explicit dismiss
//! 3. **Degraded reads** — RPC outages preserve the last status;
//!    config-read failures keep threshold/members sticky
//! 4. **Session handling** — replacing a session leaves one loop;
//!    dismissal prevents any later callback
//! 5. **Action gating** — mutual exclusion, disconnected wallets,
//!    submission failures and retry

pub mod harness;
