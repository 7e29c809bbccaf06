//! Infrastructure driver.
//!
//! Every operation resolves an execution context from the deployment
//! location, delegates to the translator, discovery service or stack
//! backend, and normalizes the outcome. The driver holds no per-call state
//! and never polls; callers poll [`InfrastructureDriver::get_infrastructure_task`].

use std::sync::Arc;

use tracing::{debug, info};

use strata_backend::{BackendError, DeploymentLocation, ExecutionContext, LocationResolver, PropertyMap};
use strata_templates::{DiscoveryRequest, DiscoveryService, TemplateTranslator};

use crate::config::DriverConfig;
use crate::error::{IacResult, InfrastructureError};
use crate::model::{
    CreateInfrastructureResponse, DeleteInfrastructureResponse, FindInfrastructureResponse,
    InfrastructureTask,
};
use crate::status::task_from_stack;

/// Drives infrastructure lifecycle operations against stack backends.
pub struct InfrastructureDriver {
    location_resolver: Arc<dyn LocationResolver>,
    translator: Arc<dyn TemplateTranslator>,
    discovery: Arc<dyn DiscoveryService>,
    config: DriverConfig,
}

impl InfrastructureDriver {
    pub fn new(
        location_resolver: Arc<dyn LocationResolver>,
        translator: Arc<dyn TemplateTranslator>,
        discovery: Arc<dyn DiscoveryService>,
    ) -> Self {
        Self {
            location_resolver,
            translator,
            discovery,
            config: DriverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Translate `template` and create a stack from it.
    ///
    /// Only the properties declared by the translated template are passed
    /// to the backend. The backend stack id is used as both the
    /// infrastructure id and the request id.
    pub async fn create_infrastructure(
        &self,
        template: &str,
        properties: &PropertyMap,
        location: &DeploymentLocation,
    ) -> IacResult<CreateInfrastructureResponse> {
        info!("Creating infrastructure in location {}", location.name);
        let context = self.resolve(location).await?;

        let native_template = self.translate(template)?;
        let inputs = context
            .filter_used_properties(&native_template, properties)
            .map_err(native_template_error)?;
        debug!(
            "Forwarding {} of {} properties to the backend",
            inputs.len(),
            properties.len()
        );

        let stack_name = self.config.stack_name();
        let stack_id = context
            .backend()
            .create_stack(&stack_name, &native_template, &inputs)
            .await?;

        info!("Requested stack {} with id {}", stack_name, stack_id);
        Ok(CreateInfrastructureResponse::new(stack_id.clone(), stack_id))
    }

    /// Request deletion of a stack.
    pub async fn delete_infrastructure(
        &self,
        infrastructure_id: &str,
        location: &DeploymentLocation,
    ) -> IacResult<DeleteInfrastructureResponse> {
        info!(
            "Deleting infrastructure {} in location {}",
            infrastructure_id, location.name
        );
        let context = self.resolve(location).await?;

        context.backend().delete_stack(infrastructure_id).await?;

        Ok(DeleteInfrastructureResponse::new(
            infrastructure_id,
            infrastructure_id,
        ))
    }

    /// Snapshot the current state of a stack as a task.
    ///
    /// `request_id` is echoed back; the lookup uses `infrastructure_id` only.
    pub async fn get_infrastructure_task(
        &self,
        infrastructure_id: &str,
        request_id: &str,
        location: &DeploymentLocation,
    ) -> IacResult<InfrastructureTask> {
        debug!(
            "Fetching task {} for infrastructure {} in location {}",
            request_id, infrastructure_id, location.name
        );
        let context = self.resolve(location).await?;

        let record = context.backend().get_stack(infrastructure_id).await?;
        let task = task_from_stack(&record, infrastructure_id, request_id);

        debug!(
            "Stack {} is {} (task status {})",
            infrastructure_id, record.stack_status, task.status
        );
        Ok(task)
    }

    /// Locate existing infrastructure by instance name.
    pub async fn find_infrastructure(
        &self,
        template: &str,
        instance_name: &str,
        location: &DeploymentLocation,
    ) -> IacResult<FindInfrastructureResponse> {
        info!(
            "Finding infrastructure '{}' in location {}",
            instance_name, location.name
        );
        let context = self.resolve(location).await?;

        self.translate(template)?;

        let request = DiscoveryRequest::new(instance_name);
        let result = self
            .discovery
            .discover(template, &context, &request)
            .await
            .map_err(InfrastructureError::from)?;

        info!("Found infrastructure '{}' with id {}", instance_name, result.id);
        Ok(FindInfrastructureResponse::new(result.id, result.outputs))
    }

    async fn resolve(&self, location: &DeploymentLocation) -> IacResult<ExecutionContext> {
        let context = self.location_resolver.resolve(location).await?;
        debug!(
            "Resolved location {} to context {}",
            location.name,
            context.location_name()
        );
        Ok(context)
    }

    fn translate(&self, template: &str) -> IacResult<String> {
        self.translator
            .translate(template)
            .map_err(InfrastructureError::from)
    }
}

impl std::fmt::Debug for InfrastructureDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfrastructureDriver")
            .field("config", &self.config)
            .finish()
    }
}

/// A translated template the input filter cannot read is a template problem.
fn native_template_error(err: BackendError) -> InfrastructureError {
    match err {
        BackendError::MalformedTemplate(msg) => InfrastructureError::InvalidTemplate(msg),
        other => InfrastructureError::Backend(other),
    }
}
