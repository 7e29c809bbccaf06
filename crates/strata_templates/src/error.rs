//! Error types for templates.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors raised by template translation and discovery.
///
/// Validation and not-discovered messages are user-facing and displayed
/// without a prefix.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotDiscovered(String),

    #[error("Backend error: {0}")]
    Backend(#[from] strata_backend::BackendError),
}

impl TemplateError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_discovered(message: impl Into<String>) -> Self {
        Self::NotDiscovered(message.into())
    }
}
