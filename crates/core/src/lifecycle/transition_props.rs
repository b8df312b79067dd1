//! Property-based tests for the configuration state machine.

use chrono::Utc;
use proptest::prelude::*;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::transition::Transitions;
use crate::lifecycle::types::{ActorId, ConfigStatus, Decision};

/// Strategy for generating opaque actor ids.
fn arb_actor() -> impl Strategy<Value = ActorId> {
    "[a-f0-9]{24}".prop_map(ActorId::new)
}

/// Strategy for generating non-blank reasons.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,20}( [a-zA-Z0-9]{1,20}){0,5}"
}

/// Strategy for generating decisions that are no longer drafts.
fn arb_terminal_decision() -> impl Strategy<Value = Decision> {
    prop_oneof![
        arb_actor().prop_map(|approved_by| Decision::Approved {
            approved_by,
            approved_at: Utc::now(),
        }),
        (arb_actor(), arb_reason()).prop_map(|(rejected_by, rejection_reason)| {
            Decision::Rejected {
                rejected_by,
                rejected_at: Utc::now(),
                rejection_reason,
            }
        }),
    ]
}

fn arb_status() -> impl Strategy<Value = ConfigStatus> {
    prop_oneof![
        Just(ConfigStatus::Draft),
        Just(ConfigStatus::Approved),
        Just(ConfigStatus::Rejected),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Draft + approve → Approved carrying exactly the approver.
    #[test]
    fn prop_approve_from_draft_records_approver(actor in arb_actor()) {
        let decision = Transitions::approve(&Decision::Draft, actor.clone()).unwrap();
        prop_assert_eq!(decision.status(), ConfigStatus::Approved);
        match decision {
            Decision::Approved { approved_by, .. } => prop_assert_eq!(approved_by, actor),
            other => prop_assert!(false, "Expected Approved, got {:?}", other),
        }
    }

    /// Draft + reject → Rejected carrying the rejecter and reason.
    #[test]
    fn prop_reject_from_draft_records_reason(actor in arb_actor(), reason in arb_reason()) {
        let decision = Transitions::reject(&Decision::Draft, actor.clone(), reason.clone()).unwrap();
        match decision {
            Decision::Rejected { rejected_by, rejection_reason, .. } => {
                prop_assert_eq!(rejected_by, actor);
                prop_assert_eq!(rejection_reason, reason);
            }
            other => prop_assert!(false, "Expected Rejected, got {:?}", other),
        }
    }

    /// Terminal records refuse every transition with InvalidState.
    #[test]
    fn prop_terminal_decisions_refuse_transitions(
        current in arb_terminal_decision(),
        actor in arb_actor(),
        reason in arb_reason(),
    ) {
        let approve = Transitions::approve(&current, actor.clone());
        let is_invalid_state = matches!(approve, Err(LifecycleError::InvalidState { .. }));
        prop_assert!(is_invalid_state);

        let reject = Transitions::reject(&current, actor, reason);
        let is_invalid_state = matches!(reject, Err(LifecycleError::InvalidState { .. }));
        prop_assert!(is_invalid_state);
    }

    /// The decision's status and the transition table agree.
    #[test]
    fn prop_transition_table_only_leaves_draft(from in arb_status(), to in arb_status()) {
        let valid = Transitions::is_valid_transition(from, to);
        prop_assert_eq!(valid, from == ConfigStatus::Draft && to != ConfigStatus::Draft);
    }
}
