//! Error type shared by the whole auth surface
//!
//! Tokens, credentials, and account lookups all fail through [`AuthError`].
//! The status and code tables here are what the HTTP layer serializes, so a
//! new variant must slot into both.

use thiserror::Error;
use unveil_store::StoreError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Token failed shape or signature checks.
    #[error("invalid token")]
    InvalidToken,

    /// Token verified but its validity window has passed.
    #[error("token expired")]
    TokenExpired,

    /// Unknown email or wrong password; deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email failed shape validation.
    #[error("invalid email address")]
    InvalidEmail,

    /// Another account already owns this email.
    #[error("email already registered")]
    EmailTaken,

    /// The account does not exist, or no longer does.
    #[error("user not found")]
    UserNotFound,

    /// The store failed underneath the operation.
    #[error("store error: {0}")]
    Store(String),

    /// Bad signing key or other construction-time problem.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Anything else; the message must never carry secrets.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status the error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken | Self::TokenExpired | Self::InvalidCredentials => 401,
            Self::InvalidEmail => 400,
            Self::EmailTaken => 409,
            Self::UserNotFound => 404,
            Self::Store(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Stable machine code for the error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => Self::EmailTaken,
            StoreError::NotFound => Self::UserNotFound,
            StoreError::Sqlx(e) => {
                tracing::error!("store error: {}", e);
                Self::Store(e.to_string())
            }
        }
    }
}
