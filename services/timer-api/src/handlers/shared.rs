//! Helpers shared across handlers
//!
//! Profile-field bounds plus the metrics helper every endpoint times itself
//! with, so limits and labels cannot drift between endpoints.

use std::time::Instant;

use crate::error::ApiError;

/// Maximum length for user-provided profile strings
pub const MAX_STRING_LEN: usize = 256;

/// Validate a user-provided string is non-empty and within bounds.
pub fn validate_profile_field(value: &str, field_name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field_name} cannot be empty")));
    }
    if value.len() > MAX_STRING_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field_name} exceeds {MAX_STRING_LEN} characters"
        )));
    }
    Ok(())
}

/// Record one handler operation's latency under an ok/err result label.
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let outcome = if success { "ok" } else { "err" };
    metrics::histogram!(
        "timer_operation_duration_seconds",
        "operation" => operation,
        "result" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}
