//! Mock location resolver for testing.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{BackendError, BackendResult};
use crate::location::{DeploymentLocation, ExecutionContext, LocationResolver};
use crate::stack::StackBackend;

/// Resolver that hands out one context for any location and records every
/// location it was asked to resolve.
#[derive(Clone)]
pub struct MockLocationResolver {
    context: ExecutionContext,
    resolved: Arc<RwLock<Vec<DeploymentLocation>>>,
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl MockLocationResolver {
    pub fn new(context: ExecutionContext) -> Self {
        Self {
            context,
            resolved: Arc::new(RwLock::new(Vec::new())),
            simulate_failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Resolve every location to a context named `mock` around `backend`.
    pub fn with_backend(backend: Arc<dyn StackBackend>) -> Self {
        Self::new(ExecutionContext::new("mock", backend))
    }

    /// Fail every resolution with [`BackendError::UnknownLocation`].
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Locations resolved so far, in call order.
    pub fn resolved(&self) -> Vec<DeploymentLocation> {
        self.resolved.read().clone()
    }

    pub fn resolve_count(&self) -> usize {
        self.resolved.read().len()
    }
}

#[async_trait]
impl LocationResolver for MockLocationResolver {
    async fn resolve(&self, location: &DeploymentLocation) -> BackendResult<ExecutionContext> {
        self.resolved.write().push(location.clone());
        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(BackendError::UnknownLocation(msg));
        }
        Ok(self.context.clone())
    }
}
