//! Session start gating

use unveil_types::UsageSnapshot;

use crate::config::TrialPolicy;

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether the session may start.
    pub allowed: bool,
    /// Human-readable denial reason, set only when not allowed.
    pub reason: Option<String>,
}

impl GateDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Pure trial-policy check for starting a timer session.
///
/// Holds no store handle; callers supply the usage snapshot they want the
/// decision based on. An account is restricted when its trial is over and it
/// has not paid. Restricted accounts keep unlimited access to sessions at or
/// under the duration cap.
#[derive(Debug, Clone, Copy)]
pub struct SessionGate {
    policy: TrialPolicy,
}

impl SessionGate {
    pub fn new(policy: TrialPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TrialPolicy {
        self.policy
    }

    /// Decide whether a session of `duration_seconds` may start.
    ///
    /// `has_paid` is read from the snapshot on every call, so an account
    /// that pays after its trial ended is unrestricted immediately.
    pub fn authorize_start(&self, usage: &UsageSnapshot, duration_seconds: i64) -> GateDecision {
        if usage.restricted() && duration_seconds > self.policy.restricted_max_secs {
            return GateDecision::deny(format!(
                "trial limit: durations over {}s require payment",
                self.policy.restricted_max_secs
            ));
        }
        GateDecision::allow()
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(TrialPolicy::default())
    }
}
