//! Discovery of existing infrastructure.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use strata_backend::{BackendError, ExecutionContext};

use crate::error::{TemplateError, TemplateResult};

/// Selector used to locate existing infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    pub instance_name: String,
}

impl DiscoveryRequest {
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
        }
    }
}

/// Infrastructure located by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub id: String,
    #[serde(default)]
    pub outputs: HashMap<String, String>,
}

impl DiscoveryResult {
    pub fn new(id: impl Into<String>, outputs: HashMap<String, String>) -> Self {
        Self {
            id: id.into(),
            outputs,
        }
    }
}

/// Discovery service trait.
///
/// Absence is reported as [`TemplateError::NotDiscovered`]; a template the
/// service cannot work with is [`TemplateError::Validation`].
#[async_trait]
pub trait DiscoveryService: Send + Sync {
    async fn discover(
        &self,
        template: &str,
        context: &ExecutionContext,
        request: &DiscoveryRequest,
    ) -> TemplateResult<DiscoveryResult>;
}

/// Discovers a stack by looking its instance name up on the context's backend.
#[derive(Debug, Clone, Default)]
pub struct BackendLookupDiscovery;

impl BackendLookupDiscovery {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DiscoveryService for BackendLookupDiscovery {
    async fn discover(
        &self,
        template: &str,
        context: &ExecutionContext,
        request: &DiscoveryRequest,
    ) -> TemplateResult<DiscoveryResult> {
        if template.trim().is_empty() {
            return Err(TemplateError::validation("Template must not be empty"));
        }

        info!(
            "Looking up stack '{}' in location {}",
            request.instance_name,
            context.location_name()
        );

        match context.backend().get_stack(&request.instance_name).await {
            Ok(record) => {
                debug!("Discovered stack {} ({})", record.id, record.stack_status);
                let outputs = record.output_map().unwrap_or_default();
                Ok(DiscoveryResult::new(record.id, outputs))
            }
            Err(BackendError::StackNotFound(_)) => Err(TemplateError::not_discovered(format!(
                "Cannot find stack with name {}",
                request.instance_name
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
