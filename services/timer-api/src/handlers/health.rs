//! Liveness and readiness probes
//!
//! Registered outside the middleware stack: no auth, no request ids, no
//! trace spans. `/health` says the process is up; `/ready` also proves the
//! account store answers a round trip.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;
use unveil_store::UserStore;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub store: &'static str,
}

/// Liveness: the process is running.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness: the configured store answers.
pub async fn ready<S: UserStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<ReadyResponse>, StatusCode> {
    if let Err(error) = state.store.ping().await {
        error!(?error, "store ping failed, reporting not ready");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(ReadyResponse {
        status: "ready",
        store: "connected",
    }))
}
