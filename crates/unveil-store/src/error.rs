use thiserror::Error;

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// An account with the same email already exists.
    #[error("email already registered")]
    EmailTaken,
}

pub type StoreResult<T> = Result<T, StoreError>;
