//! Crate-level error types

use thiserror::Error;

/// Errors produced by checkpointing, telemetry, and state loading
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("shape error: {0}")]
    Shape(String),

    #[error("invalid model state: {0}")]
    State(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
