//! Error types for the visualization server.

use thiserror::Error;

/// Result type for visualization server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the server.
#[derive(Debug, Error)]
pub enum Error {
    /// An environment variable held an unusable value
    #[error("Invalid {key}: {message}")]
    Config { key: &'static str, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] axum::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
