//! Typed errors for the autoreview library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during autoreview operations.
#[derive(Debug, Error)]
pub enum AutoreviewError {
    /// External wiki/scoring collaborator failed
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Errors raised by external collaborators (wiki API, block log, LiftWing).
///
/// Inside the rule chain these are never propagated: the evaluator records
/// an `error`-status check result and continues with the next rule.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out
    #[error("timeout during {operation}")]
    Timeout { operation: String },

    /// Remote API returned an error response
    #[error("API error: {message}")]
    Api { message: String },

    /// Collaborator is unavailable or not configured
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for autoreview operations.
pub type Result<T> = std::result::Result<T, AutoreviewError>;

/// Result type alias for collaborator calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
