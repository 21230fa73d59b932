use async_trait::async_trait;
use unveil_types::UsageSnapshot;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::{CreateUser, ProfileUpdate, UserRecord};

/// Persistence operations for user accounts and their usage counters.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by id.
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>>;

    /// Fetch a user by email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Create a new account.
    ///
    /// Returns [`StoreError::EmailTaken`](crate::StoreError::EmailTaken) if
    /// the email is already registered.
    async fn create(&self, input: CreateUser) -> StoreResult<UserRecord>;

    /// Apply a partial profile update and return the updated record.
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> StoreResult<UserRecord>;

    /// Delete an account. Returns `NotFound` if it does not exist.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Atomically add one to the user's started-timer count and flip
    /// `trial_over` once the count reaches `trial_limit`.
    ///
    /// The increment and the flag change commit together, so concurrent
    /// callers never observe a count past the limit with the flag still
    /// clear. Returns the usage state as of after this increment.
    async fn increment_timers_started(
        &self,
        id: Uuid,
        trial_limit: i64,
    ) -> StoreResult<UsageSnapshot>;

    /// Mark the account as paid (or revoke payment).
    async fn set_has_paid(&self, id: Uuid, has_paid: bool) -> StoreResult<()>;

    /// Backend liveness probe for readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}
