//! # strata_iac
//!
//! Infrastructure lifecycle driver for Strata.
//!
//! The driver turns infrastructure templates into backend stacks and reports
//! on them through a small, stable task model:
//!
//! - **Create**: translate, filter inputs to declared parameters, create stack
//! - **Delete**: request stack deletion
//! - **Task status**: map `<ACTION>_<PHASE>` stack statuses to
//!   `IN_PROGRESS`/`COMPLETE`/`FAILED`/`UNKNOWN` with failure details and outputs
//! - **Find**: locate existing infrastructure by instance name
//!
//! Errors are reported by kind ([`ErrorKind`]) so callers can tell invalid
//! templates, missing infrastructure and backend failures apart.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strata_backend::{DeploymentLocation, ExecutionContext, InMemoryStackBackend, StaticLocationResolver};
//! use strata_iac::InfrastructureDriver;
//! use strata_templates::{BackendLookupDiscovery, NativeTemplateTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = StaticLocationResolver::new()
//!         .with_context(ExecutionContext::new("core", Arc::new(InMemoryStackBackend::new())));
//!     let driver = InfrastructureDriver::new(
//!         Arc::new(resolver),
//!         Arc::new(NativeTemplateTranslator::new()),
//!         Arc::new(BackendLookupDiscovery::new()),
//!     );
//!
//!     let location = DeploymentLocation::new("core");
//!     let task = driver.get_infrastructure_task("stack-id", "stack-id", &location).await?;
//!     println!("{}", task.status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod status;

pub use config::DriverConfig;
pub use driver::InfrastructureDriver;
pub use error::{ErrorKind, IacResult, InfrastructureError};
pub use model::{
    CreateInfrastructureResponse, DeleteInfrastructureResponse, FailureCode, FailureDetails,
    FindInfrastructureResponse, InfrastructureTask, TaskStatus,
};
pub use status::{task_from_stack, task_status, StackPhase, StackStatus};
