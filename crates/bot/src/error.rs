//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the gateway. The webhook handler returns
//! `Result<T, AppError>`; any non-2xx response makes LINE redeliver the
//! whole batch.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::engine::EngineError;
use crate::line::LineError;

/// Application-level error type for the bot.
#[derive(Debug, Error)]
pub enum AppError {
    /// Event handling failed on a collaborator.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Catalog operation failed outside the engine.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// LINE API operation failed outside the engine.
    #[error("LINE error: {0}")]
    Line(#[from] LineError),

    /// Bad request from the gateway.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Webhook signature did not verify.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Engine(_) | Self::Catalog(_) | Self::Line(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Engine(_) | Self::Catalog(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Line(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to callers
        let message = match &self {
            Self::Engine(_) | Self::Catalog(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Line(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
