//! Strata CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 4: Invalid template
//! - 5: Infrastructure not found

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use strata_iac::{ErrorKind, InfrastructureError};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const INVALID_TEMPLATE: u8 = 4;
    pub const NOT_FOUND: u8 = 5;
}

const CRATES: [&str; 4] = ["strata_cli", "strata_iac", "strata_backend", "strata_templates"];

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let default_filter = CRATES
        .iter()
        .fold("warn".to_string(), |acc, krate| format!("{},{}={}", acc, krate, level));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let config = cli.config;
    let result = match cli.command {
        Commands::Task(args) => commands::task::execute(args, config).await,
        Commands::FilterInputs(args) => commands::filter_inputs::execute(args).await,
        Commands::Find(args) => commands::find::execute(args, config).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Pick the exit code from the driver error kind, if there is one.
fn categorize_error(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<InfrastructureError>().map(|err| err.kind()) {
        Some(ErrorKind::InvalidTemplate) => ExitCodes::INVALID_TEMPLATE,
        Some(ErrorKind::NotFound) => ExitCodes::NOT_FOUND,
        Some(ErrorKind::Config) => ExitCodes::INVALID_ARGS,
        Some(ErrorKind::Backend) | None => ExitCodes::GENERAL_ERROR,
    }
}
