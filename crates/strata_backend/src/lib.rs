//! # strata_backend
//!
//! Stack backend contracts for Strata.
//!
//! This crate describes everything the infrastructure driver needs from a
//! deployment location: the orchestration engine's stack API, the
//! resolution of a location descriptor into backend handles, and the
//! filtering of caller inputs down to what a native template declares.
//!
//! # Features
//!
//! - **Stack Backend**: create/delete/get operations over named stacks
//! - **Location Resolution**: descriptor to [`ExecutionContext`] lookup
//! - **Input Filtering**: drop properties a native template does not declare
//! - **In-Memory Backend**: call-recording backend for tests and tooling
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strata_backend::{
//!     DeploymentLocation, ExecutionContext, InMemoryStackBackend, LocationResolver,
//!     StaticLocationResolver,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(InMemoryStackBackend::new());
//!     let resolver = StaticLocationResolver::new()
//!         .with_context(ExecutionContext::new("core", backend));
//!
//!     let ctx = resolver.resolve(&DeploymentLocation::new("core")).await?;
//!     let record = ctx.backend().get_stack("web").await;
//!     println!("{:?}", record);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod inputs;
pub mod location;
pub mod memory;
pub mod mock;
pub mod stack;

pub use error::{BackendError, BackendResult};
pub use inputs::InputFilter;
pub use location::{DeploymentLocation, ExecutionContext, LocationResolver, StaticLocationResolver};
pub use memory::{CapturedCall, InMemoryStackBackend};
pub use mock::MockLocationResolver;
pub use stack::{PropertyMap, StackBackend, StackOutput, StackRecord};
