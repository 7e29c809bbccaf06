//! In-memory stack backend.
//!
//! Keeps stacks in a map and records every call, so it can stand in for a
//! real orchestration engine in tests and in offline tooling.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{BackendError, BackendResult};
use crate::stack::{PropertyMap, StackBackend, StackRecord};

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub method: String,
    pub stack_id: Option<String>,
    pub stack_name: Option<String>,
    pub template: Option<String>,
    pub parameters: Option<PropertyMap>,
}

impl CapturedCall {
    fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            stack_id: None,
            stack_name: None,
            template: None,
            parameters: None,
        }
    }
}

/// Stack backend holding stacks in memory.
///
/// Created stacks start in `CREATE_IN_PROGRESS`; deleted stacks move to
/// `DELETE_IN_PROGRESS`. Tests drive further transitions with
/// [`set_stack`](Self::set_stack).
#[derive(Clone, Default)]
pub struct InMemoryStackBackend {
    /// Stacks keyed by id.
    stacks: Arc<RwLock<HashMap<String, StackRecord>>>,
    /// Ids handed out by the next create calls, in order.
    scripted_ids: Arc<RwLock<Vec<String>>>,
    /// Captured calls for verification.
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Simulated failure returned by every operation.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryStackBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stack.
    pub fn with_stack(self, record: StackRecord) -> Self {
        self.set_stack(record);
        self
    }

    /// Use `id` for the next created stack instead of a generated one.
    pub fn with_next_id(self, id: impl Into<String>) -> Self {
        self.scripted_ids.write().push(id.into());
        self
    }

    /// Make every operation fail with [`BackendError::Unavailable`].
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Insert or replace a stack.
    pub fn set_stack(&self, record: StackRecord) {
        self.stacks.write().insert(record.id.clone(), record);
    }

    pub fn stack(&self, stack_id: &str) -> Option<StackRecord> {
        self.stacks.read().get(stack_id).cloned()
    }

    pub fn stack_count(&self) -> usize {
        self.stacks.read().len()
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get calls to a specific method.
    pub fn get_method_calls(&self, method: &str) -> Vec<CapturedCall> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    pub fn clear_calls(&self) {
        self.captured_calls.write().clear();
    }

    fn record_call(&self, call: CapturedCall) {
        self.captured_calls.write().push(call);
    }

    fn check_failure(&self) -> BackendResult<()> {
        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(BackendError::Unavailable(msg));
        }
        Ok(())
    }

    fn next_id(&self) -> String {
        let mut scripted = self.scripted_ids.write();
        if scripted.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            scripted.remove(0)
        }
    }

    /// Look a stack up by id first, then by name.
    fn find(&self, key: &str) -> Option<StackRecord> {
        let stacks = self.stacks.read();
        stacks.get(key).cloned().or_else(|| {
            stacks
                .values()
                .find(|s| s.stack_name.as_deref() == Some(key))
                .cloned()
        })
    }
}

#[async_trait]
impl StackBackend for InMemoryStackBackend {
    async fn create_stack(
        &self,
        stack_name: &str,
        template: &str,
        parameters: &PropertyMap,
    ) -> BackendResult<String> {
        self.record_call(CapturedCall {
            stack_name: Some(stack_name.to_string()),
            template: Some(template.to_string()),
            parameters: Some(parameters.clone()),
            ..CapturedCall::new("create_stack")
        });
        self.check_failure()?;

        let id = self.next_id();
        debug!("Creating in-memory stack {} ({})", stack_name, id);
        self.set_stack(StackRecord::new(id.clone(), "CREATE_IN_PROGRESS").with_name(stack_name));
        Ok(id)
    }

    async fn delete_stack(&self, stack_id: &str) -> BackendResult<()> {
        self.record_call(CapturedCall {
            stack_id: Some(stack_id.to_string()),
            ..CapturedCall::new("delete_stack")
        });
        self.check_failure()?;

        let mut stacks = self.stacks.write();
        let record = stacks
            .get_mut(stack_id)
            .ok_or_else(|| BackendError::StackNotFound(stack_id.to_string()))?;
        record.stack_status = "DELETE_IN_PROGRESS".to_string();
        record.stack_status_reason = None;
        record.outputs = None;
        Ok(())
    }

    async fn get_stack(&self, stack_id: &str) -> BackendResult<StackRecord> {
        self.record_call(CapturedCall {
            stack_id: Some(stack_id.to_string()),
            ..CapturedCall::new("get_stack")
        });
        self.check_failure()?;

        self.find(stack_id)
            .ok_or_else(|| BackendError::StackNotFound(stack_id.to_string()))
    }
}
