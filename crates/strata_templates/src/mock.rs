//! Mock discovery service for testing.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use strata_backend::ExecutionContext;

use crate::discovery::{DiscoveryRequest, DiscoveryResult, DiscoveryService};
use crate::error::{TemplateError, TemplateResult};

/// Scripted outcome of a mock discovery.
#[derive(Debug, Clone)]
pub enum MockDiscovery {
    Found(DiscoveryResult),
    NotDiscovered(String),
    Invalid(String),
}

/// Captured discover call.
#[derive(Debug, Clone)]
pub struct CapturedDiscovery {
    pub template: String,
    pub location_name: String,
    pub request: DiscoveryRequest,
}

/// Discovery service returning a scripted outcome.
#[derive(Clone)]
pub struct MockDiscoveryService {
    outcome: Arc<RwLock<MockDiscovery>>,
    captured_calls: Arc<RwLock<Vec<CapturedDiscovery>>>,
}

impl MockDiscoveryService {
    pub fn new(outcome: MockDiscovery) -> Self {
        Self {
            outcome: Arc::new(RwLock::new(outcome)),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn found(result: DiscoveryResult) -> Self {
        Self::new(MockDiscovery::Found(result))
    }

    pub fn not_discovered(message: impl Into<String>) -> Self {
        Self::new(MockDiscovery::NotDiscovered(message.into()))
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(MockDiscovery::Invalid(message.into()))
    }

    /// Replace the scripted outcome.
    pub fn set_outcome(&self, outcome: MockDiscovery) {
        *self.outcome.write() = outcome;
    }

    pub fn get_calls(&self) -> Vec<CapturedDiscovery> {
        self.captured_calls.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }
}

#[async_trait]
impl DiscoveryService for MockDiscoveryService {
    async fn discover(
        &self,
        template: &str,
        context: &ExecutionContext,
        request: &DiscoveryRequest,
    ) -> TemplateResult<DiscoveryResult> {
        self.captured_calls.write().push(CapturedDiscovery {
            template: template.to_string(),
            location_name: context.location_name().to_string(),
            request: request.clone(),
        });

        match self.outcome.read().clone() {
            MockDiscovery::Found(result) => Ok(result),
            MockDiscovery::NotDiscovered(msg) => Err(TemplateError::NotDiscovered(msg)),
            MockDiscovery::Invalid(msg) => Err(TemplateError::Validation(msg)),
        }
    }
}
