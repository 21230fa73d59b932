//! Request/response wire types
//!
//! Shared by the service and its clients so both sides agree on one schema.

use serde::{Deserialize, Serialize};

use crate::usage::UsageSnapshot;
use crate::user::UserId;

/// Error envelope returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error details inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error code (e.g. `INVALID_TOKEN`, `EMAIL_TAKEN`)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorBody {
    /// Build an envelope from a code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// `POST /api/v1/accounts/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// `POST /api/v1/accounts/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued on successful registration or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: UserId,
}

/// `GET /api/v1/accounts/profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub usage: UsageSnapshot,
}

/// `PUT /api/v1/accounts/profile` - absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `DELETE /api/v1/accounts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub deleted: bool,
}

/// `POST /api/v1/sessions/start`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub duration_seconds: i64,
}

/// Gate verdict plus, on approval, the post-increment usage snapshot.
///
/// Sent with 200 when authorized and 403 when denied; the body shape is the
/// same so clients parse one schema either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageSnapshot>,
}
