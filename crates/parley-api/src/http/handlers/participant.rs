//! Participant registration and roster handlers.
//!
//! Endpoints:
//! - POST /participants - Register a participant (201 / 409 / 422)
//! - GET  /participants - List the current roster

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use parley_types::participant::Participant;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

/// POST /participants - Register a participant and announce the join.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Participant>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let participant = state.presence.register(&body.name).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(participant, request_id, elapsed);

    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /participants - List every current participant.
///
/// No staleness filtering: participants past the threshold but not yet
/// swept still appear.
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Participant>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let participants = state.presence.list_active().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(participants, request_id, elapsed)))
}
