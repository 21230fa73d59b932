//! Usage snapshot types
//!
//! `UsageSnapshot` is the fixed schema for trial-gating state wherever it
//! crosses a process boundary. The field set is closed: unknown fields fail
//! deserialization so schema drift surfaces as an error instead of silently
//! propagating undefined values.

use serde::{Deserialize, Serialize};

/// Point-in-time trial-gating state for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsageSnapshot {
    /// Timers started over the account's lifetime. Never decreases.
    pub timers_started: i64,
    /// Whether the free trial has been consumed. Monotonic once true.
    pub trial_over: bool,
    /// Whether the account has paid. Lifts the restricted-mode duration cap.
    pub has_paid: bool,
}

impl UsageSnapshot {
    /// Snapshot for a freshly registered account.
    pub const fn fresh() -> Self {
        Self {
            timers_started: 0,
            trial_over: false,
            has_paid: false,
        }
    }

    /// True when restricted-mode limits apply to new sessions.
    pub const fn restricted(&self) -> bool {
        self.trial_over && !self.has_paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_is_unrestricted() {
        let snapshot = UsageSnapshot::fresh();
        assert_eq!(snapshot.timers_started, 0);
        assert!(!snapshot.restricted());
    }

    #[test]
    fn paid_accounts_are_never_restricted() {
        let snapshot = UsageSnapshot {
            timers_started: 99,
            trial_over: true,
            has_paid: true,
        };
        assert!(!snapshot.restricted());
    }

    #[test]
    fn trial_over_without_payment_is_restricted() {
        let snapshot = UsageSnapshot {
            timers_started: 5,
            trial_over: true,
            has_paid: false,
        };
        assert!(snapshot.restricted());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{"timers_started":1,"trial_over":false,"has_paid":false,"extra":1}"#;
        assert!(serde_json::from_str::<UsageSnapshot>(json).is_err());
    }

    #[test]
    fn missing_fields_are_rejected() {
        let json = r#"{"timers_started":1,"trial_over":false}"#;
        assert!(serde_json::from_str::<UsageSnapshot>(json).is_err());
    }
}
