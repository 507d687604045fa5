//! Property-based tests for the consumer-facing view model.
//!
//! Properties tested:
//! 1. Step indicator shape: steps only move forward together, at most
//!    one step is `Active`, and `Executed` is done only when executed.
//! 2. Countdown arithmetic: hidden iff threshold unknown, complete iff
//!    approvals suffice or the status says so, and received + remaining
//!    always equals the threshold while outstanding.
//! 3. Badges and terminal notices are total and deterministic.

#[cfg(test)]
mod tests {
    use {
        proptest::prelude::*,
        quorum_tracker::{
            state::ProposalTrackingState,
            status::ProposalStatus,
            view::{
                approval_countdown, status_badge, step_states, terminal_notice,
                ApprovalCountdown, StepState, TerminalNotice,
            },
        },
        solana_pubkey::Pubkey,
    };

    // ── Helpers ──

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

    fn make_state(
        status: ProposalStatus,
        approvals: usize,
        threshold: u64,
    ) -> ProposalTrackingState {
        ProposalTrackingState {
            status,
            approvals: (0..approvals)
                .map(|i| {
                    let mut bytes = [0u8; 32];
                    bytes[..8].copy_from_slice(&(i as u64).to_le_bytes());
                    Pubkey::new_from_array(bytes)
                })
                .collect(),
            threshold,
            ..ProposalTrackingState::default()
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1. Step indicator shape
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn step_indicator_is_well_formed(status in any_status()) {
            let steps = step_states(status);

            // ── INVARIANT: at most one step is Active ──
            let active = steps
                .iter()
                .filter(|step| **step == StepState::Active)
                .count();
            prop_assert!(active <= 1);

            // ── INVARIANT: Done steps form a prefix ──
            let done_prefix = steps
                .iter()
                .take_while(|step| **step == StepState::Done)
                .count();
            let done_total = steps
                .iter()
                .filter(|step| **step == StepState::Done)
                .count();
            prop_assert_eq!(done_prefix, done_total);

            // ── INVARIANT: the Executed step is Done only when executed ──
            prop_assert_eq!(
                steps[2] == StepState::Done,
                status == ProposalStatus::Executed
            );

            // ── INVARIANT: terminal non-executed outcomes advance nothing ──
            if status.is_terminal() && status != ProposalStatus::Executed {
                prop_assert_eq!(
                    steps,
                    [StepState::Pending, StepState::Pending, StepState::Pending]
                );
            }

            // Determinism.
            prop_assert_eq!(steps, step_states(status));
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 2. Countdown arithmetic
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn countdown_arithmetic_is_consistent(
            status in any_status(),
            approvals in 0..10usize,
            threshold in 0..10u64,
        ) {
            let state = make_state(status, approvals, threshold);
            let countdown = approval_countdown(&state);

            match countdown {
                ApprovalCountdown::Hidden => {
                    // ── INVARIANT: hidden iff threshold unknown ──
                    prop_assert_eq!(threshold, 0);
                    prop_assert!(approval_countdown(&state).label().is_none());
                }
                ApprovalCountdown::Complete => {
                    prop_assert!(threshold > 0);
                    // ── INVARIANT: complete iff the count or status says so ──
                    prop_assert!(
                        approvals as u64 >= threshold || status.is_approval_complete()
                    );
                }
                ApprovalCountdown::Outstanding { received, threshold: shown, remaining } => {
                    prop_assert_eq!(received, approvals as u64);
                    prop_assert_eq!(shown, threshold);
                    // ── INVARIANT: received + remaining == threshold ──
                    prop_assert_eq!(received.saturating_add(remaining), threshold);
                    prop_assert!(remaining > 0);

                    let label = approval_countdown(&state).label().unwrap();
                    prop_assert_eq!(label, format!("{received} of {threshold} received"));
                }
            }
        }

        #[test]
        fn countdown_complete_never_regresses_with_more_approvals(
            status in any_status(),
            approvals in 0..10usize,
            threshold in 1..10u64,
        ) {
            let before = approval_countdown(&make_state(status, approvals, threshold));
            let after = approval_countdown(&make_state(
                status,
                approvals.saturating_add(1),
                threshold,
            ));

            // ── INVARIANT: adding an approval never un-completes ──
            if before == ApprovalCountdown::Complete {
                prop_assert_eq!(after, ApprovalCountdown::Complete);
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 3. Badges and terminal notices are total and deterministic
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn badge_is_total_and_deterministic(status in any_status()) {
            let badge = status_badge(status);
            prop_assert!(!badge.label.is_empty());
            prop_assert_eq!(badge, status_badge(status));

            // The pseudo-states share the generic loading label.
            if matches!(status, ProposalStatus::Loading | ProposalStatus::NotFound) {
                prop_assert_eq!(badge.label, "Loading...");
            } else {
                prop_assert_eq!(badge.label, status.to_string());
            }
        }

        #[test]
        fn terminal_notice_iff_terminal(status in any_status()) {
            let notice = terminal_notice(status);

            // ── INVARIANT: a notice exists exactly for terminal statuses ──
            prop_assert_eq!(notice.is_some(), status.is_terminal());

            match notice {
                Some(TerminalNotice::Executed { .. }) => {
                    prop_assert_eq!(status, ProposalStatus::Executed);
                }
                Some(TerminalNotice::NotExecuted { headline, detail }) => {
                    prop_assert!(matches!(
                        status,
                        ProposalStatus::Rejected | ProposalStatus::Cancelled
                    ));
                    prop_assert!(headline.contains(&status.to_string()));
                    prop_assert!(detail.contains("will not be executed"));
                }
                None => {}
            }
        }
    }
}
