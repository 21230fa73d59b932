//! Usage status handler

use axum::extract::State;
use axum::Json;
use tracing::instrument;
use unveil_store::UserStore;
use unveil_types::UsageSnapshot;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/usage/status
#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn usage_status<S: UserStore>(
    State(state): State<AppState<S>>,
    user: AuthUser,
) -> ApiResult<Json<UsageSnapshot>> {
    let usage = state.ledger.snapshot(user.user_id).await?;
    Ok(Json(usage))
}
