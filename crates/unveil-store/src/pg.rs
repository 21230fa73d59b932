//! PostgreSQL store implementation

use async_trait::async_trait;
use sqlx::PgPool;
use unveil_types::UsageSnapshot;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::{CreateUser, ProfileUpdate, UserRecord};
use crate::store::UserStore;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, \
     timers_started, trial_over, has_paid, created_at, updated_at";

/// PostgreSQL-backed [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UsageRow {
    timers_started: i64,
    trial_over: bool,
    has_paid: bool,
}

impl From<UsageRow> for UsageSnapshot {
    fn from(row: UsageRow) -> Self {
        UsageSnapshot {
            timers_started: row.timers_started,
            trial_over: row.trial_over,
            has_paid: row.has_paid,
        }
    }
}

/// Maps unique-constraint violations on the email column to `EmailTaken`.
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return StoreError::EmailTaken;
        }
    }
    StoreError::Sqlx(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, input: CreateUser) -> StoreResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(input.id)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row)
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> StoreResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_insert_error)?;

        row.ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn increment_timers_started(
        &self,
        id: Uuid,
        trial_limit: i64,
    ) -> StoreResult<UsageSnapshot> {
        // Single statement so concurrent starts cannot lose increments and
        // the flag commits with the count that crossed the limit.
        let row = sqlx::query_as::<_, UsageRow>(
            r#"
            UPDATE users
            SET timers_started = timers_started + 1,
                trial_over = trial_over OR (timers_started + 1 >= $2),
                updated_at = NOW()
            WHERE id = $1
            RETURNING timers_started, trial_over, has_paid
            "#,
        )
        .bind(id)
        .bind(trial_limit)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UsageSnapshot::from).ok_or(StoreError::NotFound)
    }

    async fn set_has_paid(&self, id: Uuid, has_paid: bool) -> StoreResult<()> {
        let result = sqlx::query("UPDATE users SET has_paid = $1, updated_at = NOW() WHERE id = $2")
            .bind(has_paid)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
