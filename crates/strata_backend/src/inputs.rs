//! Input filtering against a native template's declared parameters.

use serde_yaml::Value;
use tracing::debug;

use crate::error::{BackendError, BackendResult};
use crate::stack::PropertyMap;

const DEFAULT_PARAMETERS_SECTION: &str = "parameters";

/// Selects the properties a native template actually declares.
///
/// Each execution context carries one filter so the rules for a backend
/// live next to its client rather than in every caller.
#[derive(Debug, Clone)]
pub struct InputFilter {
    section: String,
}

impl Default for InputFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputFilter {
    /// Create a filter reading the `parameters` section.
    pub fn new() -> Self {
        Self {
            section: DEFAULT_PARAMETERS_SECTION.to_string(),
        }
    }

    /// Read declarations from a different top-level section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// List the parameter names declared by a native template.
    pub fn declared_parameters(&self, template: &str) -> BackendResult<Vec<String>> {
        let document: Value = serde_yaml::from_str(template)
            .map_err(|e| BackendError::MalformedTemplate(e.to_string()))?;

        let root = match document {
            Value::Mapping(root) => root,
            Value::Null => return Ok(Vec::new()),
            _ => {
                return Err(BackendError::MalformedTemplate(
                    "template root is not a mapping".to_string(),
                ))
            }
        };

        match root.get(self.section.as_str()) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Mapping(parameters)) => Ok(parameters
                .keys()
                .filter_map(|k| k.as_str().map(|s| s.to_string()))
                .collect()),
            Some(_) => Err(BackendError::MalformedTemplate(format!(
                "'{}' section is not a mapping",
                self.section
            ))),
        }
    }

    /// Keep only the properties whose keys the template declares.
    pub fn filter_used_properties(
        &self,
        template: &str,
        properties: &PropertyMap,
    ) -> BackendResult<PropertyMap> {
        let declared = self.declared_parameters(template)?;

        let filtered: PropertyMap = properties
            .iter()
            .filter(|(key, _)| declared.iter().any(|d| d == *key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if filtered.len() < properties.len() {
            debug!(
                "Dropped {} properties not declared by template",
                properties.len() - filtered.len()
            );
        }

        Ok(filtered)
    }
}
