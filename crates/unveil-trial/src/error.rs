use thiserror::Error;
use unveil_store::StoreError;

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum TrialError {
    /// The account does not exist.
    #[error("user not found")]
    NotFound,

    /// Store failure.
    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for TrialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            other => {
                tracing::error!("ledger store error: {}", other);
                Self::Store(other.to_string())
            }
        }
    }
}
