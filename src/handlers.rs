use crate::call_events::CallReceiver;
use crate::config::Config;
use crate::errors::AppError;
use crate::lookup_client::CallerLookupClient;
use crate::normalizer::{is_ussd, normalize_number};
use crate::overlay::{spawn_overlay_service, OverlayHandle, OverlayState};
use crate::screen::{ScreenCard, ScreenState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the caller lookup API.
    pub lookup_client: CallerLookupClient,
    /// Handle to the overlay service task.
    pub overlay: OverlayHandle,
    /// Call event listener. Events are applied one at a time.
    pub call_receiver: Mutex<CallReceiver<OverlayHandle>>,
}

impl AppState {
    /// Builds the state and spawns the overlay service. Must run inside a tokio runtime.
    pub fn new(config: Config, lookup_client: CallerLookupClient) -> Self {
        let overlay = spawn_overlay_service(lookup_client.clone());
        let call_receiver = CallReceiver::new(
            overlay.clone(),
            config.default_region.clone(),
            config.overlay_stop_delay(),
        );

        Self {
            config,
            lookup_client,
            overlay,
            call_receiver: Mutex::new(call_receiver),
        }
    }
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-dialer-info",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

#[derive(Debug, Deserialize)]
pub struct CallerQueryParams {
    pub number: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallerScreenResponse {
    /// The number actually sent to the lookup API.
    pub caller: String,
    pub card: ScreenCard,
}

/// GET /api/v1/caller
///
/// The in-app screen. Looks the caller up and returns the rendered card.
/// Lookup failures are part of the card (an error card), not an HTTP error.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameters containing the number and an optional region hint.
pub async fn get_caller(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallerQueryParams>,
) -> Result<Json<CallerScreenResponse>, AppError> {
    let raw = params
        .number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'number' is required".to_string()))?;

    if is_ussd(raw) {
        return Err(AppError::BadRequest(
            "USSD codes cannot be looked up".to_string(),
        ));
    }

    let region = params
        .region
        .as_deref()
        .unwrap_or(state.config.default_region.as_str());
    let caller = normalize_number(raw, Some(region));

    let result = state.lookup_client.fetch_caller_details(&caller).await;
    if let Err(ref e) = result {
        tracing::warn!("Caller lookup failed: {}", e);
    }

    let card = ScreenState::from_lookup(result).render(chrono::Local::now().naive_local());

    Ok(Json(CallerScreenResponse { caller, card }))
}

/// GET /api/v1/overlay
pub async fn get_overlay(State(state): State<Arc<AppState>>) -> Json<OverlayState> {
    Json(state.overlay.current())
}

/// DELETE /api/v1/overlay
///
/// The close button on the bubble.
pub async fn close_overlay(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.overlay.close();
    (StatusCode::ACCEPTED, Json(json!({ "status": "closing" })))
}
