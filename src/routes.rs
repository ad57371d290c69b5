use crate::handlers::{self, AppState};
use crate::webhook_handler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// API routes. Rate limiting and body limits are layered on by the caller.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // In-app surface
        .route("/api/v1/caller", get(handlers::get_caller))
        // Overlay surface
        .route(
            "/api/v1/overlay",
            get(handlers::get_overlay).delete(handlers::close_overlay),
        )
        // Call events from the telephony bridge
        .route(
            "/api/v1/events/call",
            post(webhook_handler::call_event_webhook),
        )
}

/// Routes that bypass rate limiting.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(handlers::health))
}
