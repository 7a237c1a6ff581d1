//! Heartbeat handler.
//!
//! Endpoint:
//! - POST /status - Refresh the caller's liveness timestamp (200 / 404)

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /status - Keep-alive for the calling participant.
pub async fn heartbeat(
    State(state): State<AppState>,
    Caller(name): Caller,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.presence.heartbeat(&name).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::empty(request_id, elapsed)))
}
