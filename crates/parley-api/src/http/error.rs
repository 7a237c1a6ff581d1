//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use parley_types::error::{MessageError, PresenceError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Presence-related errors.
    Presence(PresenceError),
    /// Message-related errors.
    Message(MessageError),
    /// Request validation error at the transport edge.
    Validation(String),
}

impl From<PresenceError> for AppError {
    fn from(e: PresenceError) -> Self {
        AppError::Presence(e)
    }
}

impl From<MessageError> for AppError {
    fn from(e: MessageError) -> Self {
        AppError::Message(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Presence(PresenceError::NameTaken(name)) => (
                StatusCode::CONFLICT,
                "NAME_TAKEN",
                format!("Participant '{name}' already exists"),
            ),
            AppError::Presence(PresenceError::InvalidName(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::Presence(PresenceError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Participant not found".to_string(),
            ),
            AppError::Presence(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PRESENCE_ERROR",
                e.to_string(),
            ),
            AppError::Message(MessageError::Invalid(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            AppError::Message(MessageError::UnknownSender(name)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNKNOWN_SENDER",
                format!("Sender '{name}' is not in the room"),
            ),
            AppError::Message(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MESSAGE_ERROR",
                e.to_string(),
            ),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
        };

        let body = ApiResponse::error(code, &message, String::new(), 0);
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::Presence(PresenceError::NameTaken("ana".into()))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Presence(PresenceError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Presence(PresenceError::InvalidName("x".into()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Message(MessageError::UnknownSender("ana".into()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Message(MessageError::Storage("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
