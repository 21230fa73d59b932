//! Trial policy knobs

/// Limits applied to unpaid accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialPolicy {
    /// Started timers after which the trial is over.
    pub trial_limit: i64,
    /// Longest duration (seconds) a restricted account may start.
    pub restricted_max_secs: i64,
}

impl TrialPolicy {
    pub const fn new(trial_limit: i64, restricted_max_secs: i64) -> Self {
        Self {
            trial_limit,
            restricted_max_secs,
        }
    }
}

impl Default for TrialPolicy {
    /// Five free timers, then a 60-second cap until payment.
    fn default() -> Self {
        Self::new(5, 60)
    }
}
