//! Request extractors
//!
//! [`AuthUser`] turns a `Bearer` token into a verified [`UserId`] before a
//! handler body runs. Verification is local (signature and expiry against
//! the HMAC key), with no store access on the hot path.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use unveil_auth_core::AuthError;
use unveil_store::UserStore;
use unveil_types::{ErrorBody, UserId};

use crate::state::AppState;

/// Authenticated user extracted from the bearer token.
///
/// Extraction proves the token signature and expiry only; whether the
/// account still exists is the handler's concern (a deleted account with a
/// live token gets a 404 from the operation, not a 401 here).
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// Rejection carrying the same error envelope the handlers use.
#[derive(Debug)]
pub struct AuthRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<AppState<S>> for AuthUser
where
    S: UserStore + 'static,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;

        let user_id = state.auth.authenticate(&token).map_err(|e| {
            tracing::debug!(error = ?e, "Token verification failed");
            match e {
                AuthError::TokenExpired => AuthRejection {
                    status: StatusCode::UNAUTHORIZED,
                    code: "TOKEN_EXPIRED",
                    message: "Token has expired",
                },
                _ => AuthRejection {
                    status: StatusCode::UNAUTHORIZED,
                    code: "INVALID_TOKEN",
                    message: "Invalid token",
                },
            }
        })?;

        Ok(AuthUser { user_id })
    }
}

/// Pull the token out of an `Authorization: Bearer` header.
///
/// Any non-Bearer scheme counts as missing; a header that is not valid
/// UTF-8 is a malformed request rather than a failed authentication.
fn extract_token(parts: &Parts) -> Result<String, AuthRejection> {
    let Some(header_value) = parts.headers.get(header::AUTHORIZATION) else {
        return Err(missing_token());
    };

    let value = header_value.to_str().map_err(|_| AuthRejection {
        status: StatusCode::BAD_REQUEST,
        code: "INVALID_HEADER",
        message: "Invalid Authorization header encoding",
    })?;

    match value.strip_prefix("Bearer ") {
        Some(token) => Ok(token.to_string()),
        None => Err(missing_token()),
    }
}

fn missing_token() -> AuthRejection {
    AuthRejection {
        status: StatusCode::UNAUTHORIZED,
        code: "MISSING_TOKEN",
        message: "No authentication token provided",
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Request};

    use super::*;

    fn parts_with_auth(value: Option<HeaderValue>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_is_extracted() {
        let parts = parts_with_auth(Some(HeaderValue::from_static("Bearer abc.def")));
        assert_eq!(extract_token(&parts).unwrap(), "abc.def");
    }

    #[test]
    fn missing_header_is_rejected() {
        let parts = parts_with_auth(None);
        let rejection = extract_token(&parts).unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNAUTHORIZED);
        assert_eq!(rejection.code, "MISSING_TOKEN");
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let parts = parts_with_auth(Some(HeaderValue::from_static("Basic dXNlcjpwdw==")));
        let rejection = extract_token(&parts).unwrap_err();
        assert_eq!(rejection.code, "MISSING_TOKEN");
    }

    #[test]
    fn non_utf8_header_is_a_bad_request() {
        let parts = parts_with_auth(Some(
            HeaderValue::from_bytes(b"Bearer \xFF\xFE").unwrap(),
        ));
        let rejection = extract_token(&parts).unwrap_err();
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.code, "INVALID_HEADER");
    }
}
