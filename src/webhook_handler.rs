use crate::call_events::CallEventHandler;
use crate::errors::AppError;
use crate::handlers::AppState;
use crate::webhook_models::{CallEventPayload, CallEventResponse};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

/// Call Event Webhook Handler
///
/// Receives call-state events from the telephony bridge and hands them to the
/// call receiver, which decides whether to show or stop the overlay.
///
/// Authentication: X-Webhook-Token header must match WEBHOOK_SECRET env var (when set)
pub async fn call_event_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CallEventPayload>,
) -> Result<(StatusCode, Json<CallEventResponse>), AppError> {
    validate_webhook_secret(&state, &headers)?;

    let CallEventPayload { event, region } = payload;

    let dispatch = {
        let mut receiver = state
            .call_receiver
            .lock()
            .map_err(|_| AppError::InternalError("Call receiver lock poisoned".to_string()))?;
        receiver.on_call_event(event, region.as_deref())
    };

    tracing::info!("Call event handled: {}", dispatch.action());

    Ok((StatusCode::OK, Json(CallEventResponse::from(&dispatch))))
}

/// Validate webhook secret from X-Webhook-Token header
fn validate_webhook_secret(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    // If no secret is configured, skip validation (warn was already logged at startup)
    let Some(ref expected_secret) = state.config.webhook_secret else {
        return Ok(());
    };

    let token = headers
        .get("X-Webhook-Token")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing X-Webhook-Token header".to_string()))?;

    if !constant_time_compare(token, expected_secret) {
        tracing::warn!("Invalid webhook token received");
        return Err(AppError::Unauthorized("Invalid webhook token".to_string()));
    }

    Ok(())
}

/// Constant-time string comparison
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes().iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("secret", "secret"));
        assert!(!constant_time_compare("secret", "secreT"));
        assert!(!constant_time_compare("secret", "secret1"));
        assert!(constant_time_compare("", ""));
    }
}
