//! Template translation.

use serde_yaml::Value;
use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

/// Converts a source template into the backend-native stack template.
///
/// Implementations report authoring problems as
/// [`TemplateError::Validation`] with a message meant for the template
/// author.
pub trait TemplateTranslator: Send + Sync {
    fn translate(&self, template: &str) -> TemplateResult<String>;
}

/// Translator for templates that are already in the native format.
///
/// The source is checked to be a mapping with a non-empty `resources`
/// section and is returned unchanged.
#[derive(Debug, Clone)]
pub struct NativeTemplateTranslator {
    required_section: String,
}

impl Default for NativeTemplateTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeTemplateTranslator {
    pub fn new() -> Self {
        Self {
            required_section: "resources".to_string(),
        }
    }

    /// Require a different top-level section.
    pub fn with_required_section(mut self, section: impl Into<String>) -> Self {
        self.required_section = section.into();
        self
    }
}

impl TemplateTranslator for NativeTemplateTranslator {
    fn translate(&self, template: &str) -> TemplateResult<String> {
        let document: Value = serde_yaml::from_str(template)
            .map_err(|e| TemplateError::validation(format!("Template is not valid YAML: {}", e)))?;

        let root = document
            .as_mapping()
            .ok_or_else(|| TemplateError::validation("Template must be a mapping"))?;

        match root.get(self.required_section.as_str()) {
            Some(Value::Mapping(section)) if !section.is_empty() => {
                debug!(
                    "Native template declares {} {}",
                    section.len(),
                    self.required_section
                );
                Ok(template.to_string())
            }
            Some(_) => Err(TemplateError::validation(format!(
                "Template section '{}' must be a non-empty mapping",
                self.required_section
            ))),
            None => Err(TemplateError::validation(format!(
                "Template is missing required section '{}'",
                self.required_section
            ))),
        }
    }
}
