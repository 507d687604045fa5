//! Quorum Property-Based Invariant Tests
//!
//! Uses proptest to verify critical tracker invariants across:
//! - Status model purity and lifecycle classification
//! - Tracking engine transitions (stickiness, exactly-once execution)
//! - View model determinism (steps, countdown, badges, notices)

pub mod lifecycle_invariants;
pub mod view_invariants;
