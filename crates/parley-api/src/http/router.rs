//! Axum router configuration with middleware.
//!
//! Routes are mounted at the root, matching the transport contract the
//! original clients poll. Middleware: CORS (allow-any, as the reference
//! service did) and request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/participants",
            post(handlers::participant::register).get(handlers::participant::list_participants),
        )
        .route(
            "/messages",
            post(handlers::message::post_message).get(handlers::message::list_messages),
        )
        .route("/status", post(handlers::status::heartbeat))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
