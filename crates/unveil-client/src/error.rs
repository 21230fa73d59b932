//! Client-side errors
//!
//! One enum for everything an API call can produce: transport failures from
//! `reqwest`, HTTP statuses mapped by category, and payloads the client
//! refuses to accept. Each variant knows whether a retry could help.

use thiserror::Error;

/// Error from a timer API or image service call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server could not be reached at the transport level.
    #[error("connection failed: {message}")]
    Connection {
        message: String,
        /// Retry hint, set from the failure kind at construction.
        retryable: bool,
    },

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Token missing, invalid, or expired (HTTP 401).
    #[error("authentication required: {0}")]
    Unauthenticated(String),

    /// Signed in but not allowed (HTTP 403 outside the gate protocol).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// No such resource (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the request body (HTTP 400).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A uniqueness rule fired, usually the email (HTTP 409).
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The response body failed to parse or failed validation.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    /// The server failed internally (HTTP 5xx without a better mapping).
    #[error("server error: {0}")]
    Server(String),

    /// The server is up but declining work (HTTP 503).
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The client itself is misconfigured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { retryable, .. } => *retryable,
            Self::Timeout | Self::Unavailable(_) => true,
            Self::Unauthenticated(_)
            | Self::PermissionDenied(_)
            | Self::NotFound(_)
            | Self::InvalidArgument(_)
            | Self::AlreadyExists(_)
            | Self::InvalidResponse(_)
            | Self::Server(_)
            | Self::Config(_) => false,
        }
    }

    /// Build a [`ClientError::Connection`] with an explicit retry hint.
    pub fn connection(message: impl Into<String>, retryable: bool) -> Self {
        Self::Connection {
            message: message.into(),
            retryable,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::connection(err.to_string(), true)
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::connection(err.to_string(), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(ClientError::Timeout.is_retryable());
        assert!(ClientError::Unavailable("maintenance".to_string()).is_retryable());
        assert!(ClientError::connection("refused", true).is_retryable());
    }

    #[test]
    fn definitive_answers_are_not_retryable() {
        assert!(!ClientError::NotFound("user".to_string()).is_retryable());
        assert!(!ClientError::InvalidArgument("bad duration".to_string()).is_retryable());
        assert!(!ClientError::Unauthenticated("no token".to_string()).is_retryable());
        assert!(!ClientError::AlreadyExists("email".to_string()).is_retryable());
        assert!(!ClientError::connection("bad tls config", false).is_retryable());
    }
}
