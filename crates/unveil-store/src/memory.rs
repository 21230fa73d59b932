use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use unveil_types::UsageSnapshot;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::{CreateUser, ProfileUpdate, UserRecord};
use crate::store::UserStore;

/// In-memory [`UserStore`] backed by `DashMap`.
///
/// Used by the test suites and by the API when no database is configured.
/// Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<Uuid, UserRecord>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        Ok(self.users.get(&id).map(|r| r.clone()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let Some(id) = self.by_email.get(email).map(|r| *r) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|r| r.clone()))
    }

    async fn create(&self, input: CreateUser) -> StoreResult<UserRecord> {
        // The email index entry doubles as the uniqueness check.
        match self.by_email.entry(input.email.clone()) {
            Entry::Occupied(_) => return Err(StoreError::EmailTaken),
            Entry::Vacant(slot) => {
                slot.insert(input.id);
            }
        }

        let now = Utc::now();
        let record = UserRecord {
            id: input.id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password_hash,
            timers_started: 0,
            trial_over: false,
            has_paid: false,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> StoreResult<UserRecord> {
        let current = self
            .users
            .get(&id)
            .map(|r| r.clone())
            .ok_or(StoreError::NotFound)?;

        // Reserve the new email before touching the record so a concurrent
        // create cannot claim it in between.
        let email_change = match update.email.as_deref() {
            Some(new_email) if new_email != current.email => {
                match self.by_email.entry(new_email.to_owned()) {
                    Entry::Occupied(_) => return Err(StoreError::EmailTaken),
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                }
                Some((current.email.clone(), new_email.to_owned()))
            }
            _ => None,
        };

        let updated = match self.users.get_mut(&id) {
            Some(mut record) => {
                if let Some(first_name) = update.first_name {
                    record.first_name = first_name;
                }
                if let Some(last_name) = update.last_name {
                    record.last_name = last_name;
                }
                if let Some((_, ref new_email)) = email_change {
                    record.email = new_email.clone();
                }
                record.updated_at = Utc::now();
                record.clone()
            }
            None => {
                // Record vanished under us; release the reservation.
                if let Some((_, new_email)) = email_change {
                    self.by_email.remove_if(&new_email, |_, v| *v == id);
                }
                return Err(StoreError::NotFound);
            }
        };

        if let Some((old_email, _)) = email_change {
            self.by_email.remove_if(&old_email, |_, v| *v == id);
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let (_, record) = self.users.remove(&id).ok_or(StoreError::NotFound)?;
        self.by_email.remove_if(&record.email, |_, v| *v == id);
        Ok(())
    }

    async fn increment_timers_started(
        &self,
        id: Uuid,
        trial_limit: i64,
    ) -> StoreResult<UsageSnapshot> {
        // get_mut holds the shard lock, so concurrent increments serialize
        // and none is lost.
        let mut record = self.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.timers_started += 1;
        if record.timers_started >= trial_limit {
            record.trial_over = true;
        }
        record.updated_at = Utc::now();
        Ok(record.usage())
    }

    async fn set_has_paid(&self, id: Uuid, has_paid: bool) -> StoreResult<()> {
        let mut record = self.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.has_paid = has_paid;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
