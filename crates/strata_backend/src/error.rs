//! Error types for the backend module.

use thiserror::Error;

/// Result type alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors raised by stack backends and location resolution.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Stack not found: {0}")]
    StackNotFound(String),

    #[error("Stack request rejected: {0}")]
    RequestRejected(String),

    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    #[error("Unknown deployment location: {0}")]
    UnknownLocation(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
