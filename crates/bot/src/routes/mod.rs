//! HTTP route handlers for the bot.
//!
//! # Route Structure
//!
//! ```text
//! POST /webhook  - LINE webhook delivery (signed batches of events)
//! GET  /health   - Liveness check
//! ```

pub mod webhook;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Create all routes for the bot.
pub fn routes() -> Router<AppState> {
    Router::new().route("/webhook", post(webhook::handle_webhook))
}
