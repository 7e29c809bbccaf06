//! Task command - Normalize a backend stack document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use strata_backend::StackRecord;

use super::{offline_driver, print_json};

#[derive(Args)]
pub struct TaskArgs {
    /// Stack document as returned by the backend (JSON or YAML)
    #[arg(short, long)]
    stack: PathBuf,

    /// Request id to report (defaults to the stack id)
    #[arg(short, long)]
    request_id: Option<String>,
}

pub async fn execute(args: TaskArgs, config: Option<PathBuf>) -> Result<()> {
    let record = StackRecord::from_file(&args.stack)
        .with_context(|| format!("Failed to load stack document {:?}", args.stack))?;
    info!("Normalizing stack {} ({})", record.id, record.stack_status);

    let stack_id = record.id.clone();
    let request_id = args.request_id.unwrap_or_else(|| stack_id.clone());
    let (driver, location) = offline_driver(vec![record], config.as_deref())?;

    let task = driver
        .get_infrastructure_task(&stack_id, &request_id, &location)
        .await?;

    print_json(&task)
}
