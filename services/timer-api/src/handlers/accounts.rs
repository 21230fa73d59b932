//! Account handlers (register, login, profile, delete)

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;
use unveil_auth_core::NewAccount;
use unveil_store::{ProfileUpdate, UserRecord, UserStore};
use unveil_types::{
    DeleteAccountResponse, LoginRequest, ProfileResponse, RegisterRequest, TokenResponse,
    UpdateProfileRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::{record_op_duration, validate_profile_field};
use crate::state::AppState;

fn profile_body(record: UserRecord) -> ProfileResponse {
    let usage = record.usage();
    ProfileResponse {
        first_name: record.first_name,
        last_name: record.last_name,
        email: record.email,
        usage,
    }
}

/// POST /api/v1/accounts/register
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let start = Instant::now();

    validate_profile_field(&req.first_name, "first_name")?;
    validate_profile_field(&req.last_name, "last_name")?;
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("password cannot be empty".to_string()));
    }

    let (user, token) = state
        .auth
        .register(NewAccount {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    metrics::counter!("timer_accounts_registered_total").increment(1);
    record_op_duration("register", start, true);

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            user_id: user.user_id(),
        }),
    ))
}

/// POST /api/v1/accounts/login
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let start = Instant::now();

    let (user, token) = state.auth.login(&req.email, &req.password).await?;

    record_op_duration("login", start, true);

    Ok(Json(TokenResponse {
        token,
        user_id: user.user_id(),
    }))
}

/// GET /api/v1/accounts/profile
#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn get_profile<S: UserStore>(
    State(state): State<AppState<S>>,
    user: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let record = state.auth.profile(user.user_id).await?;
    Ok(Json(profile_body(record)))
}

/// PUT /api/v1/accounts/profile
///
/// Partial update; absent fields are left unchanged. An empty update is a
/// no-op that answers with the current profile.
#[instrument(skip(state, req), fields(user_id = %user.user_id))]
pub async fn update_profile<S: UserStore>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    if let Some(first_name) = req.first_name.as_deref() {
        validate_profile_field(first_name, "first_name")?;
    }
    if let Some(last_name) = req.last_name.as_deref() {
        validate_profile_field(last_name, "last_name")?;
    }

    let update = ProfileUpdate {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };

    let record = if update.is_empty() {
        state.auth.profile(user.user_id).await?
    } else {
        state.auth.update_profile(user.user_id, update).await?
    };

    Ok(Json(profile_body(record)))
}

/// DELETE /api/v1/accounts
#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn delete_account<S: UserStore>(
    State(state): State<AppState<S>>,
    user: AuthUser,
) -> ApiResult<Json<DeleteAccountResponse>> {
    state.auth.delete_account(user.user_id).await?;
    Ok(Json(DeleteAccountResponse { deleted: true }))
}
