//! Property-based tests for the status model and tracking engine.
//!
//! Properties tested:
//! 1. Status classification is a pure function of the status alone.
//! 2. Threshold/members stickiness: failed config reads never reset them.
//! 3. Execution is observed exactly once per session, regardless of how
//!    many polls see `Executed`.
//! 4. Read errors never change the status; successful reads clear them.

#[cfg(test)]
mod tests {
    use {
        proptest::prelude::*,
        quorum_tracker::{
            state::{PollControl, TrackerEngine},
            status::ProposalStatus,
            types::{MultisigConfig, ProposalSnapshot, TrackedProposal},
        },
        solana_pubkey::Pubkey,
        solana_signature::Signature,
    };

    // ── Helpers ──

    const ON_CHAIN_TAGS: [&str; 7] = [
        "Draft",
        "Active",
        "Approved",
        "Executing",
        "Executed",
        "Rejected",
        "Cancelled",
    ];

    const ALL_STATUSES: [ProposalStatus; 9] = [
        ProposalStatus::Draft,
        ProposalStatus::Active,
        ProposalStatus::Approved,
        ProposalStatus::Executing,
        ProposalStatus::Executed,
        ProposalStatus::Rejected,
        ProposalStatus::Cancelled,
        ProposalStatus::Loading,
        ProposalStatus::NotFound,
    ];

    fn any_status() -> impl Strategy<Value = ProposalStatus> {
        proptest::sample::select(ALL_STATUSES.to_vec())
    }

    fn any_tag() -> impl Strategy<Value = String> {
        proptest::sample::select(ON_CHAIN_TAGS.to_vec()).prop_map(str::to_string)
    }

    fn make_pubkey(seed: u8) -> Pubkey {
        let mut bytes = [0u8; 32];
        bytes[0] = seed;
        bytes[31] = 0xAA;
        Pubkey::new_from_array(bytes)
    }

    fn tracking_engine() -> TrackerEngine {
        let mut engine = TrackerEngine::new();
        engine.begin_tracking(TrackedProposal::new(
            make_pubkey(1),
            7,
            "memo",
            Signature::default(),
        ));
        engine
    }

    fn snapshot(tag: &str, approvals: usize) -> ProposalSnapshot {
        ProposalSnapshot {
            status_tag: tag.to_string(),
            approved_by: (0..approvals)
                .map(|i| make_pubkey(i.min(255) as u8))
                .collect(),
            rejected_by: vec![],
        }
    }

    /// One scripted poll outcome.
    #[derive(Debug, Clone)]
    enum PollEvent {
        Read { tag: String, approvals: usize },
        Missing,
        Error,
        Config { threshold: u64, members: usize },
    }

    fn any_event() -> impl Strategy<Value = PollEvent> {
        prop_oneof![
            (any_tag(), 0..5usize).prop_map(|(tag, approvals)| PollEvent::Read { tag, approvals }),
            Just(PollEvent::Missing),
            Just(PollEvent::Error),
            (1..6u64, 1..6usize)
                .prop_map(|(threshold, members)| PollEvent::Config { threshold, members }),
        ]
    }

    fn apply(engine: &mut TrackerEngine, event: &PollEvent) -> Option<PollControl> {
        match event {
            PollEvent::Read { tag, approvals } => {
                Some(engine.on_proposal_read(snapshot(tag, *approvals)))
            }
            PollEvent::Missing => Some(engine.on_proposal_missing()),
            PollEvent::Error => Some(engine.on_read_error("rpc error")),
            PollEvent::Config { threshold, members } => {
                engine.on_config_read(MultisigConfig {
                    threshold: *threshold,
                    members: (0..*members).map(|i| make_pubkey(i as u8)).collect(),
                });
                None
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1. Status classification is pure and self-consistent
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn status_predicates_are_pure(status in any_status()) {
            // Repeated calls always agree.
            prop_assert_eq!(status.is_terminal(), status.is_terminal());
            prop_assert_eq!(status.is_approval_complete(), status.is_approval_complete());

            // ── INVARIANT: approval-complete statuses are non-terminal ──
            if status.is_approval_complete() {
                prop_assert!(!status.is_terminal());
            }

            // ── INVARIANT: the terminal set is exactly {Executed, Rejected, Cancelled} ──
            let expected_terminal = matches!(
                status,
                ProposalStatus::Executed | ProposalStatus::Rejected | ProposalStatus::Cancelled
            );
            prop_assert_eq!(status.is_terminal(), expected_terminal);
        }

        #[test]
        fn on_chain_tags_round_trip(tag in any_tag()) {
            let status = ProposalStatus::from_raw_tag(&tag).unwrap();
            prop_assert_eq!(status.to_string(), tag);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 2. Threshold/members stickiness across arbitrary poll sequences
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn threshold_moves_only_on_config_reads(events in prop::collection::vec(any_event(), 1..30)) {
            let mut engine = tracking_engine();
            let mut expected_threshold = 0u64;
            let mut expected_members = 0usize;

            for event in &events {
                if let PollEvent::Config { threshold, members } = event {
                    expected_threshold = *threshold;
                    expected_members = *members;
                }
                apply(&mut engine, event);

                // ── INVARIANT: only config reads move threshold/members ──
                prop_assert_eq!(engine.state().threshold, expected_threshold);
                prop_assert_eq!(engine.state().members.len(), expected_members);
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 3. Execution observed exactly once per session
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn execution_observed_exactly_once(events in prop::collection::vec(any_event(), 1..40)) {
            let mut engine = tracking_engine();
            let mut observed = 0u32;

            for event in &events {
                if apply(&mut engine, event) == Some(PollControl::ExecutionObserved) {
                    observed = observed.saturating_add(1);
                }
            }

            let saw_executed = events.iter().any(|event| {
                matches!(event, PollEvent::Read { tag, .. } if tag == "Executed")
            });

            // ── INVARIANT: the directive fires once iff Executed was read ──
            prop_assert_eq!(observed, u32::from(saw_executed));
        }

        #[test]
        fn new_session_resets_execution_flag(first in 1..10usize, second in 1..10usize) {
            let mut engine = tracking_engine();
            let mut observed = 0u32;
            for _ in 0..first {
                if engine.on_proposal_read(snapshot("Executed", 0))
                    == PollControl::ExecutionObserved
                {
                    observed = observed.saturating_add(1);
                }
            }
            prop_assert_eq!(observed, 1);

            engine.begin_tracking(TrackedProposal::new(
                make_pubkey(2),
                8,
                "second",
                Signature::default(),
            ));
            let mut observed = 0u32;
            for _ in 0..second {
                if engine.on_proposal_read(snapshot("Executed", 0))
                    == PollControl::ExecutionObserved
                {
                    observed = observed.saturating_add(1);
                }
            }
            prop_assert_eq!(observed, 1);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 4. Errors never change status; successful reads clear them
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn read_errors_preserve_status(events in prop::collection::vec(any_event(), 1..30)) {
            let mut engine = tracking_engine();

            for event in &events {
                let status_before = engine.state().status;
                apply(&mut engine, event);
                let state = engine.state();

                match event {
                    PollEvent::Error => {
                        // ── INVARIANT: errors record a message, keep the status ──
                        prop_assert_eq!(state.status, status_before);
                        prop_assert!(state.last_error.is_some());
                    }
                    PollEvent::Missing => {
                        // ── INVARIANT: "not found" is not an error ──
                        prop_assert_eq!(state.status, ProposalStatus::NotFound);
                        prop_assert!(state.last_error.is_none());
                    }
                    PollEvent::Read { tag, .. } => {
                        prop_assert_eq!(state.status.to_string(), tag.clone());
                        prop_assert!(state.last_error.is_none());
                    }
                    PollEvent::Config { .. } => {
                        prop_assert_eq!(state.status, status_before);
                    }
                }
            }
        }
    }
}
