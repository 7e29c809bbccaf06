//! Error types for the infrastructure driver.

use thiserror::Error;

use strata_backend::BackendError;
use strata_templates::TemplateError;

/// Result type alias for driver operations.
pub type IacResult<T> = Result<T, InfrastructureError>;

/// Errors surfaced by the infrastructure driver.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// The template was rejected by translation or discovery.
    #[error("{0}")]
    InvalidTemplate(String),

    /// Discovery found no infrastructure for the selector.
    #[error("{0}")]
    NotFound(String),

    /// Failure reported by the backend or location resolution, unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Category of an [`InfrastructureError`] for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidTemplate,
    NotFound,
    Backend,
    Config,
}

impl InfrastructureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InfrastructureError::InvalidTemplate(_) => ErrorKind::InvalidTemplate,
            InfrastructureError::NotFound(_) => ErrorKind::NotFound,
            InfrastructureError::Backend(_) => ErrorKind::Backend,
            InfrastructureError::Io(_) | InfrastructureError::Yaml(_) => ErrorKind::Config,
        }
    }

    /// Whether the caller's input caused the error. Such errors are never
    /// worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidTemplate | ErrorKind::NotFound)
    }
}

impl From<TemplateError> for InfrastructureError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Validation(msg) => InfrastructureError::InvalidTemplate(msg),
            TemplateError::NotDiscovered(msg) => InfrastructureError::NotFound(msg),
            TemplateError::Backend(e) => InfrastructureError::Backend(e),
        }
    }
}
