//! CLI command definitions.
//!
//! The commands run the driver offline: stacks come from local documents
//! and are served by the in-memory backend.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use strata_backend::{
    DeploymentLocation, ExecutionContext, InMemoryStackBackend, PropertyMap, StackRecord,
    StaticLocationResolver,
};
use strata_iac::{DriverConfig, InfrastructureDriver};
use strata_templates::{BackendLookupDiscovery, NativeTemplateTranslator};

pub mod filter_inputs;
pub mod find;
pub mod task;

/// Name of the location the offline commands resolve to.
pub const LOCAL_LOCATION: &str = "local";

/// Strata - infrastructure lifecycle driver
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Strata - infrastructure lifecycle driver")]
#[command(long_about = r#"
Strata drives infrastructure templates through a stack orchestration backend
and reports on stacks with a small, stable task model.

COMMANDS:
  task           → Normalize a backend stack document into a task
  filter-inputs  → Show the properties a template would receive on create
  find           → Locate a stack by instance name among stack documents

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  4 - Invalid template
  5 - Infrastructure not found
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Driver configuration file (YAML)
    #[arg(long, global = true, env = "STRATA_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a backend stack document into an infrastructure task
    Task(task::TaskArgs),

    /// Show which properties a native template would receive
    #[command(name = "filter-inputs")]
    FilterInputs(filter_inputs::FilterInputsArgs),

    /// Find a stack by instance name
    Find(find::FindArgs),
}

/// Build a driver whose only location serves `stacks` from memory.
pub fn offline_driver(
    stacks: Vec<StackRecord>,
    config: Option<&Path>,
) -> Result<(InfrastructureDriver, DeploymentLocation)> {
    let backend = stacks
        .into_iter()
        .fold(InMemoryStackBackend::new(), |backend, stack| backend.with_stack(stack));

    let resolver = StaticLocationResolver::new()
        .with_context(ExecutionContext::new(LOCAL_LOCATION, Arc::new(backend)));

    let config = match config {
        Some(path) => DriverConfig::from_file(path)
            .with_context(|| format!("Failed to load driver config {:?}", path))?,
        None => DriverConfig::default(),
    };

    let driver = InfrastructureDriver::new(
        Arc::new(resolver),
        Arc::new(NativeTemplateTranslator::new()),
        Arc::new(BackendLookupDiscovery::new()),
    )
    .with_config(config);

    Ok((driver, DeploymentLocation::new(LOCAL_LOCATION)))
}

/// Read a template file.
pub fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read template {:?}", path))
}

/// Read a YAML or JSON property file.
pub fn read_properties(path: &Path) -> Result<PropertyMap> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read properties {:?}", path))?;
    if content.trim().is_empty() {
        return Ok(PropertyMap::new());
    }
    let properties: PropertyMap = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid properties file {:?}", path))?;
    Ok(properties)
}

/// Print a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
