//! Session start handler - the trial gate in front of the usage ledger

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;
use unveil_store::UserStore;
use unveil_types::{StartSessionRequest, StartSessionResponse};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::record_op_duration;
use crate::state::AppState;

/// POST /api/v1/sessions/start
///
/// Gate first, record second: the decision is made against the snapshot as
/// it stood before this start, and only an approved start is counted. The
/// 403 denial carries the same body shape as the 200 approval.
#[instrument(skip(state, req), fields(user_id = %user.user_id, duration_seconds = req.duration_seconds))]
pub async fn start_session<S: UserStore>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Json(req): Json<StartSessionRequest>,
) -> ApiResult<(StatusCode, Json<StartSessionResponse>)> {
    let start = Instant::now();

    if req.duration_seconds <= 0 {
        return Err(ApiError::BadRequest(
            "duration_seconds must be positive".to_string(),
        ));
    }

    let usage = state.ledger.snapshot(user.user_id).await?;
    let decision = state.gate.authorize_start(&usage, req.duration_seconds);

    if !decision.allowed {
        tracing::info!(
            timers_started = usage.timers_started,
            "session start denied"
        );
        metrics::counter!("timer_sessions_denied_total").increment(1);
        record_op_duration("start_session", start, true);

        return Ok((
            StatusCode::FORBIDDEN,
            Json(StartSessionResponse {
                authorized: false,
                reason: decision.reason,
                usage: None,
            }),
        ));
    }

    let after = state.ledger.record_timer_start(user.user_id).await?;

    metrics::counter!("timer_sessions_authorized_total").increment(1);
    record_op_duration("start_session", start, true);

    Ok((
        StatusCode::OK,
        Json(StartSessionResponse {
            authorized: true,
            reason: None,
            usage: Some(after),
        }),
    ))
}
