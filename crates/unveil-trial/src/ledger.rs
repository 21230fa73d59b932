//! Usage ledger

use std::sync::Arc;
use unveil_store::UserStore;
use unveil_types::{UsageSnapshot, UserId};

use crate::config::TrialPolicy;
use crate::error::TrialError;

/// Records started timers against accounts.
///
/// The increment and the trial flag both commit in a single store operation,
/// so concurrent starts cannot lose counts or leave the flag behind the
/// count that crossed the limit.
pub struct UsageLedger<S> {
    store: Arc<S>,
    policy: TrialPolicy,
}

impl<S: UserStore> UsageLedger<S> {
    pub fn new(store: Arc<S>, policy: TrialPolicy) -> Self {
        Self { store, policy }
    }

    /// Record one started timer and return the usage state after it.
    pub async fn record_timer_start(&self, user_id: UserId) -> Result<UsageSnapshot, TrialError> {
        let usage = self
            .store
            .increment_timers_started(user_id.as_uuid(), self.policy.trial_limit)
            .await?;
        tracing::debug!(
            user_id = %user_id,
            timers_started = usage.timers_started,
            trial_over = usage.trial_over,
            "timer start recorded"
        );
        Ok(usage)
    }

    /// Read the current usage state without recording anything.
    pub async fn snapshot(&self, user_id: UserId) -> Result<UsageSnapshot, TrialError> {
        let user = self
            .store
            .find_by_id(user_id.as_uuid())
            .await?
            .ok_or(TrialError::NotFound)?;
        Ok(user.usage())
    }
}

impl<S> std::fmt::Debug for UsageLedger<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageLedger")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_store::{CreateUser, MemoryUserStore};
    use uuid::Uuid;

    async fn ledger_with_user() -> (UsageLedger<MemoryUserStore>, UserId) {
        let store = Arc::new(MemoryUserStore::new());
        let user = store
            .create(CreateUser {
                id: Uuid::new_v4(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                password_hash: "$argon2id$fake".into(),
            })
            .await
            .unwrap();
        let ledger = UsageLedger::new(store, TrialPolicy::default());
        (ledger, user.user_id())
    }

    #[tokio::test]
    async fn counts_advance_and_trial_flips_at_limit() {
        let (ledger, user_id) = ledger_with_user().await;

        for expected in 1..=4 {
            let usage = ledger.record_timer_start(user_id).await.unwrap();
            assert_eq!(usage.timers_started, expected);
            assert!(!usage.trial_over);
        }

        let usage = ledger.record_timer_start(user_id).await.unwrap();
        assert_eq!(usage.timers_started, 5);
        assert!(usage.trial_over);

        // The flag never clears once set.
        let usage = ledger.record_timer_start(user_id).await.unwrap();
        assert_eq!(usage.timers_started, 6);
        assert!(usage.trial_over);
    }

    #[tokio::test]
    async fn snapshot_reads_without_recording() {
        let (ledger, user_id) = ledger_with_user().await;

        ledger.record_timer_start(user_id).await.unwrap();
        let before = ledger.snapshot(user_id).await.unwrap();
        let after = ledger.snapshot(user_id).await.unwrap();

        assert_eq!(before.timers_started, 1);
        assert_eq!(after.timers_started, 1);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = Arc::new(MemoryUserStore::new());
        let ledger = UsageLedger::new(store, TrialPolicy::default());
        let ghost = UserId::new();

        assert!(matches!(
            ledger.record_timer_start(ghost).await,
            Err(TrialError::NotFound)
        ));
        assert!(matches!(
            ledger.snapshot(ghost).await,
            Err(TrialError::NotFound)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_starts_all_recorded() {
        let (ledger, user_id) = ledger_with_user().await;
        let ledger = Arc::new(ledger);

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move { ledger.record_timer_start(user_id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let usage = ledger.snapshot(user_id).await.unwrap();
        assert_eq!(usage.timers_started, 5);
        assert!(usage.trial_over);
    }
}
