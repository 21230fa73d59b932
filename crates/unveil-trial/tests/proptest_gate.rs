//! Property-based tests for the session gate
//!
//! These tests verify:
//! - Denial happens exactly when the account is restricted and the duration
//!   exceeds the cap
//! - Allowed decisions never carry a reason, denied decisions always do
//! - Paid accounts are never denied

use proptest::prelude::*;
use unveil_trial::{SessionGate, TrialPolicy};
use unveil_types::UsageSnapshot;

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary usage snapshots
fn arb_usage() -> impl Strategy<Value = UsageSnapshot> {
    (0i64..200, any::<bool>(), any::<bool>()).prop_map(|(timers_started, trial_over, has_paid)| {
        UsageSnapshot {
            timers_started,
            trial_over,
            has_paid,
        }
    })
}

/// Generate requested durations, weighted to straddle the default cap
fn arb_duration() -> impl Strategy<Value = i64> {
    prop_oneof![
        1i64..=60,
        61i64..=120,
        121i64..=86_400,
    ]
}

// ============================================================================
// Gate Decision Properties
// ============================================================================

proptest! {
    /// Property: deny exactly when restricted and over the cap
    #[test]
    fn prop_denial_matches_policy(usage in arb_usage(), duration in arb_duration()) {
        let gate = SessionGate::default();
        let decision = gate.authorize_start(&usage, duration);

        let restricted = usage.trial_over && !usage.has_paid;
        let expect_deny = restricted && duration > 60;
        prop_assert_eq!(decision.allowed, !expect_deny);
    }

    /// Property: reason is present iff the decision is a denial
    #[test]
    fn prop_reason_only_on_denial(usage in arb_usage(), duration in arb_duration()) {
        let gate = SessionGate::default();
        let decision = gate.authorize_start(&usage, duration);
        prop_assert_eq!(decision.allowed, decision.reason.is_none());
    }

    /// Property: paid accounts are never denied
    #[test]
    fn prop_paid_never_denied(
        timers_started in 0i64..10_000,
        trial_over in any::<bool>(),
        duration in arb_duration(),
    ) {
        let usage = UsageSnapshot { timers_started, trial_over, has_paid: true };
        let gate = SessionGate::default();
        prop_assert!(gate.authorize_start(&usage, duration).allowed);
    }

    /// Property: durations at or under the cap are always allowed
    #[test]
    fn prop_short_sessions_always_allowed(usage in arb_usage(), duration in 1i64..=60) {
        let gate = SessionGate::default();
        prop_assert!(gate.authorize_start(&usage, duration).allowed);
    }

    /// Property: the denial reason names the configured cap
    #[test]
    fn prop_reason_names_cap(cap in 1i64..600, over in 1i64..100) {
        let gate = SessionGate::new(TrialPolicy::new(5, cap));
        let restricted = UsageSnapshot { timers_started: 5, trial_over: true, has_paid: false };

        let decision = gate.authorize_start(&restricted, cap + over);
        prop_assert!(!decision.allowed);
        let reason = decision.reason.unwrap();
        prop_assert!(reason.contains(&format!("{cap}s")), "reason was: {reason}");
    }
}

// ============================================================================
// Non-Property Edge Case Tests
// ============================================================================

#[test]
fn test_decision_is_pure() {
    // Same inputs, same decision, no hidden state.
    let gate = SessionGate::default();
    let usage = UsageSnapshot {
        timers_started: 5,
        trial_over: true,
        has_paid: false,
    };
    let first = gate.authorize_start(&usage, 61);
    let second = gate.authorize_start(&usage, 61);
    assert_eq!(first, second);
}

#[test]
fn test_default_policy_values() {
    let policy = TrialPolicy::default();
    assert_eq!(policy.trial_limit, 5);
    assert_eq!(policy.restricted_max_secs, 60);
}
