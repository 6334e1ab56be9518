//! LINE-related errors.

use thiserror::Error;

/// Errors that can occur when interacting with LINE.
#[derive(Debug, Error)]
pub enum LineError {
    /// HTTP request failed.
    #[error("LINE request failed: {0}")]
    Request(String),

    /// Failed to read or parse a response.
    #[error("LINE response error: {0}")]
    Response(String),

    /// The Messaging API returned an error status.
    #[error("LINE API error: {0}")]
    Api(String),

    /// Invalid webhook signature.
    #[error("Invalid LINE signature: {0}")]
    InvalidSignature(String),
}
