//! Response and task types returned by the driver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Normalized status of an infrastructure task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    InProgress,
    Complete,
    Failed,
    Unknown,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Complete => "COMPLETE",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Unknown => "UNKNOWN",
        }
    }

    /// Whether the task will not change status on a later poll.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Complete | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCode {
    InfrastructureError,
    InsufficientCapacity,
    ResourceAlreadyExists,
    ResourceNotFound,
    InternalError,
    Unknown,
}

impl FailureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::InfrastructureError => "INFRASTRUCTURE_ERROR",
            FailureCode::InsufficientCapacity => "INSUFFICIENT_CAPACITY",
            FailureCode::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            FailureCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            FailureCode::InternalError => "INTERNAL_ERROR",
            FailureCode::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INFRASTRUCTURE_ERROR" => Some(FailureCode::InfrastructureError),
            "INSUFFICIENT_CAPACITY" => Some(FailureCode::InsufficientCapacity),
            "RESOURCE_ALREADY_EXISTS" => Some(FailureCode::ResourceAlreadyExists),
            "RESOURCE_NOT_FOUND" => Some(FailureCode::ResourceNotFound),
            "INTERNAL_ERROR" => Some(FailureCode::InternalError),
            "UNKNOWN" => Some(FailureCode::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a task failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetails {
    pub failure_code: FailureCode,
    pub description: Option<String>,
}

impl FailureDetails {
    pub fn new(failure_code: FailureCode, description: Option<String>) -> Self {
        Self {
            failure_code,
            description,
        }
    }

    pub fn infrastructure_error(description: Option<String>) -> Self {
        Self::new(FailureCode::InfrastructureError, description)
    }
}

/// Point-in-time view of an asynchronous backend operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureTask {
    pub infrastructure_id: String,
    pub request_id: String,
    pub status: TaskStatus,
    pub failure_details: Option<FailureDetails>,
    /// Never `Some` with an empty map.
    pub outputs: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInfrastructureResponse {
    pub infrastructure_id: String,
    pub request_id: String,
}

impl CreateInfrastructureResponse {
    pub fn new(infrastructure_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            infrastructure_id: infrastructure_id.into(),
            request_id: request_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteInfrastructureResponse {
    pub infrastructure_id: String,
    pub request_id: String,
}

impl DeleteInfrastructureResponse {
    pub fn new(infrastructure_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            infrastructure_id: infrastructure_id.into(),
            request_id: request_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindInfrastructureResponse {
    pub infrastructure_id: String,
    pub outputs: HashMap<String, String>,
}

impl FindInfrastructureResponse {
    pub fn new(infrastructure_id: impl Into<String>, outputs: HashMap<String, String>) -> Self {
        Self {
            infrastructure_id: infrastructure_id.into(),
            outputs,
        }
    }
}
