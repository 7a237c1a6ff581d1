//! Caller identity extractor.
//!
//! The caller's participant name travels in the `User` header. Extracting
//! `Caller` turns it into an explicit parameter for the core services --
//! identity is never ambient request state. The header is required and
//! must be non-blank; whether the name belongs to a registered participant
//! is the services' concern, not the extractor's.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::state::AppState;

/// The participant name a request claims to act as.
pub struct Caller(pub String);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get("user") else {
            return Err(AppError::Validation(
                "Missing 'User' header with the caller's participant name".to_string(),
            ));
        };

        let name = value
            .to_str()
            .map_err(|_| AppError::Validation("Invalid 'User' header encoding".to_string()))?
            .trim();

        if name.is_empty() {
            return Err(AppError::Validation(
                "'User' header must not be blank".to_string(),
            ));
        }

        Ok(Caller(name.to_string()))
    }
}
