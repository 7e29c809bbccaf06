//! Stack backend trait and stack records.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendResult;

/// Input properties passed to a stack on create.
pub type PropertyMap = HashMap<String, Value>;

/// A single entry of a stack's output list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackOutput {
    pub output_key: String,
    #[serde(default)]
    pub output_value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StackOutput {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            output_key: key.into(),
            output_value: value.into(),
            description: None,
        }
    }

    /// Render the output value as text.
    ///
    /// Strings are returned as-is, `null` becomes an empty string and any
    /// other JSON value is rendered compactly.
    pub fn value_as_string(&self) -> String {
        match &self.output_value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Stack state as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackRecord {
    /// Backend-assigned stack identifier
    pub id: String,
    /// Name the stack was created under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    /// Raw status string, e.g. `CREATE_IN_PROGRESS`
    pub stack_status: String,
    /// Free-text reason attached to the current status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_status_reason: Option<String>,
    /// Output list, only populated by the backend once outputs resolve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<StackOutput>>,
}

impl StackRecord {
    pub fn new(id: impl Into<String>, stack_status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stack_name: None,
            stack_status: stack_status.into(),
            stack_status_reason: None,
            outputs: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.stack_name = Some(name.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.stack_status_reason = Some(reason.into());
        self
    }

    pub fn with_output(mut self, output: StackOutput) -> Self {
        self.outputs.get_or_insert_with(Vec::new).push(output);
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<StackOutput>) -> Self {
        self.outputs = Some(outputs);
        self
    }

    /// Fold the output list into a key/value map.
    ///
    /// Returns `None` when the list is missing or empty, so "no outputs"
    /// has a single representation.
    pub fn output_map(&self) -> Option<HashMap<String, String>> {
        let outputs = self.outputs.as_ref().filter(|o| !o.is_empty())?;
        Some(
            outputs
                .iter()
                .map(|o| (o.output_key.clone(), o.value_as_string()))
                .collect(),
        )
    }

    /// Load a stack document from a JSON or YAML file.
    pub fn from_file(path: &Path) -> BackendResult<Self> {
        let content = fs::read_to_string(path)?;
        let record: StackRecord = serde_yaml::from_str(&content)?;
        Ok(record)
    }
}

/// Stack backend trait.
///
/// Implementations talk to the orchestration engine of one deployment
/// location. Errors are returned unmodified to the caller of the driver.
#[async_trait]
pub trait StackBackend: Send + Sync {
    /// Create a stack and return the backend-assigned stack id.
    async fn create_stack(
        &self,
        stack_name: &str,
        template: &str,
        parameters: &PropertyMap,
    ) -> BackendResult<String>;

    /// Request deletion of a stack.
    async fn delete_stack(&self, stack_id: &str) -> BackendResult<()>;

    /// Fetch the current state of a stack by id or name.
    async fn get_stack(&self, stack_id: &str) -> BackendResult<StackRecord>;
}
