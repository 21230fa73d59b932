//! Error types for the Timer API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use unveil_auth_core::AuthError;
use unveil_trial::TrialError;
use unveil_types::ErrorBody;

/// Handler error, rendered as the JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Trial(#[from] TrialError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Auth(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Trial(TrialError::NotFound) => StatusCode::NOT_FOUND,
            Self::Trial(TrialError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Auth(err) => err.error_code(),
            Self::Trial(TrialError::NotFound) => "USER_NOT_FOUND",
            Self::Trial(TrialError::Store(_)) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log server-side faults; client mistakes stay at debug
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed server-side");
        } else {
            tracing::debug!(error = ?self, "Request rejected");
        }

        let body = ErrorBody::new(code, self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Shorthand for handler returns.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_keep_their_status_and_code() {
        let err = ApiError::from(AuthError::EmailTaken);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "EMAIL_TAKEN");

        let err = ApiError::from(AuthError::TokenExpired);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "TOKEN_EXPIRED");
    }

    #[test]
    fn unknown_users_map_to_not_found() {
        let err = ApiError::from(TrialError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "USER_NOT_FOUND");
    }

    #[test]
    fn bad_requests_carry_the_message() {
        let err = ApiError::BadRequest("duration_seconds must be positive".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("duration_seconds"));
    }
}
