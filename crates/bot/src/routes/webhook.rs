//! LINE webhook handler.
//!
//! Receives signed event batches, verifies the signature against the raw
//! body before parsing anything, and fans the events out to the
//! conversation engine.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::line::WebhookPayload;
use crate::state::AppState;

/// Handle a LINE webhook delivery.
///
/// Events in a batch are processed concurrently; no ordering is guaranteed
/// across them. The batch is all-or-nothing: if any event fails on a
/// collaborator, the whole delivery fails and LINE redelivers it. Replies
/// for events that already succeeded are not repeated - the engine skips
/// event ids it has seen.
#[instrument(skip(state, headers, body))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing signature header".into()))?;

    // Verify against the raw bytes, before any parsing
    state
        .line()
        .verify_signature(&body, signature)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Failed to parse payload: {e}")))?;

    let event_count = payload.events.len();
    try_join_all(payload.events.iter().map(|event| state.engine().handle(event))).await?;

    debug!(event_count, "Webhook batch processed");

    Ok(StatusCode::OK)
}
