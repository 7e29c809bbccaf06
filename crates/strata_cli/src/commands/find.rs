//! Find command - Locate a stack by instance name.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use strata_backend::StackRecord;

use super::{offline_driver, print_json, read_template};

#[derive(Args)]
pub struct FindArgs {
    /// Infrastructure template
    #[arg(short, long)]
    template: PathBuf,

    /// Instance name to look for
    #[arg(short = 'n', long)]
    instance_name: String,

    /// List of known stack documents (JSON or YAML)
    #[arg(short, long)]
    stacks: PathBuf,
}

pub async fn execute(args: FindArgs, config: Option<PathBuf>) -> Result<()> {
    let template = read_template(&args.template)?;

    let content = fs::read_to_string(&args.stacks)
        .with_context(|| format!("Failed to read stacks {:?}", args.stacks))?;
    let stacks: Vec<StackRecord> = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid stacks file {:?}", args.stacks))?;

    let (driver, location) = offline_driver(stacks, config.as_deref())?;
    let found = driver
        .find_infrastructure(&template, &args.instance_name, &location)
        .await?;

    print_json(&found)
}
