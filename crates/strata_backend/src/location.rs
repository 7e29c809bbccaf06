//! Deployment locations and execution contexts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{BackendError, BackendResult};
use crate::inputs::InputFilter;
use crate::stack::{PropertyMap, StackBackend};

/// Descriptor of where infrastructure is deployed.
///
/// The driver treats this as opaque and hands it to a [`LocationResolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentLocation {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl DeploymentLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location_type: None,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Load a location descriptor from a YAML or JSON file.
    pub fn from_file(path: &Path) -> BackendResult<Self> {
        let content = fs::read_to_string(path)?;
        let location: DeploymentLocation = serde_yaml::from_str(&content)?;
        Ok(location)
    }

    /// Save the location descriptor as YAML.
    pub fn to_file(&self, path: &Path) -> BackendResult<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Backend handles resolved for one deployment location.
#[derive(Clone)]
pub struct ExecutionContext {
    location_name: String,
    backend: Arc<dyn StackBackend>,
    input_filter: InputFilter,
}

impl ExecutionContext {
    pub fn new(location_name: impl Into<String>, backend: Arc<dyn StackBackend>) -> Self {
        Self {
            location_name: location_name.into(),
            backend,
            input_filter: InputFilter::default(),
        }
    }

    pub fn with_input_filter(mut self, input_filter: InputFilter) -> Self {
        self.input_filter = input_filter;
        self
    }

    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    pub fn backend(&self) -> &Arc<dyn StackBackend> {
        &self.backend
    }

    pub fn input_filter(&self) -> &InputFilter {
        &self.input_filter
    }

    /// Keep only the properties declared by `template`.
    pub fn filter_used_properties(
        &self,
        template: &str,
        properties: &PropertyMap,
    ) -> BackendResult<PropertyMap> {
        self.input_filter.filter_used_properties(template, properties)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("location_name", &self.location_name)
            .field("input_filter", &self.input_filter)
            .finish()
    }
}

/// Resolves a deployment location into an execution context.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, location: &DeploymentLocation) -> BackendResult<ExecutionContext>;
}

/// Resolver backed by a fixed set of pre-built contexts keyed by location name.
#[derive(Default)]
pub struct StaticLocationResolver {
    contexts: HashMap<String, ExecutionContext>,
}

impl StaticLocationResolver {
    pub fn new() -> Self {
        Self {
            contexts: HashMap::new(),
        }
    }

    /// Register a context under its location name, replacing any previous one.
    pub fn register(&mut self, context: ExecutionContext) {
        let name = context.location_name().to_string();
        debug!("Registering deployment location: {}", name);
        self.contexts.insert(name, context);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.register(context);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.contexts.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[async_trait]
impl LocationResolver for StaticLocationResolver {
    async fn resolve(&self, location: &DeploymentLocation) -> BackendResult<ExecutionContext> {
        self.contexts
            .get(&location.name)
            .cloned()
            .ok_or_else(|| BackendError::UnknownLocation(location.name.clone()))
    }
}

impl std::fmt::Debug for StaticLocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticLocationResolver")
            .field("locations", &self.contexts.keys().collect::<Vec<_>>())
            .finish()
    }
}
