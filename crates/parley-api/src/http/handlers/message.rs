//! Message posting and reading handlers.
//!
//! Endpoints:
//! - POST /messages         - Post a message as the caller (201 / 422)
//! - GET  /messages?limit=N - Read the messages visible to the caller
//!
//! The caller's identity arrives in the `User` header (see the `Caller`
//! extractor) and is threaded into the service as an explicit parameter.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use parley_types::message::{ChatMessage, MessageKind};

use crate::http::error::AppError;
use crate::http::extractors::caller::Caller;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for posting a message.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// Query parameters for message listing.
///
/// `limit` is taken as a raw string: anything that is not a positive
/// integer means "no limit", matching the permissive parse of the
/// reference transport.
#[derive(Debug, Deserialize, Default)]
pub struct MessageListQuery {
    pub limit: Option<String>,
}

fn parse_limit(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

/// POST /messages - Post a message from the caller.
pub async fn post_message(
    State(state): State<AppState>,
    Caller(from): Caller,
    Json(body): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state
        .messages
        .post(&from, &body.to, &body.text, body.kind)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::empty(request_id, elapsed)),
    ))
}

/// GET /messages - Messages visible to the caller, newest-first.
pub async fn list_messages(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let limit = parse_limit(query.limit.as_deref());
    let messages = state.messages.list(&caller, limit).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(messages, request_id, elapsed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_accepts_positive_integers() {
        assert_eq!(parse_limit(Some("100")), Some(100));
        assert_eq!(parse_limit(Some(" 3 ")), Some(3));
    }

    #[test]
    fn test_parse_limit_treats_junk_as_unlimited() {
        assert_eq!(parse_limit(None), None);
        assert_eq!(parse_limit(Some("")), None);
        assert_eq!(parse_limit(Some("abc")), None);
        assert_eq!(parse_limit(Some("1.5")), None);
        assert_eq!(parse_limit(Some("0")), None);
        assert_eq!(parse_limit(Some("-2")), None);
    }
}
