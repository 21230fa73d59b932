use chrono::{DateTime, Utc};
use sqlx::FromRow;
use unveil_types::{UsageSnapshot, UserId};
use uuid::Uuid;

/// A stored user account row.
///
/// The usage counters live on the account row itself so that a timer-start
/// increment and the trial flag it may flip commit in one statement.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub timers_started: i64,
    pub trial_over: bool,
    pub has_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn user_id(&self) -> UserId {
        UserId::from(self.id)
    }

    /// The usage-relevant projection of this record.
    pub fn usage(&self) -> UsageSnapshot {
        UsageSnapshot {
            timers_started: self.timers_started,
            trial_over: self.trial_over,
            has_paid: self.has_paid,
        }
    }
}

/// Input for creating a user account.
///
/// Counters start at zero and both flags start false; the store fills in
/// timestamps.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial profile update. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}
