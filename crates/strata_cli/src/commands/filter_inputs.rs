//! Filter-inputs command - Show the properties a template would receive.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use strata_backend::InputFilter;
use strata_iac::InfrastructureError;
use strata_templates::{NativeTemplateTranslator, TemplateTranslator};

use super::{print_json, read_properties, read_template};

#[derive(Args)]
pub struct FilterInputsArgs {
    /// Native stack template
    #[arg(short, long)]
    template: PathBuf,

    /// Candidate properties (JSON or YAML mapping)
    #[arg(short, long)]
    properties: PathBuf,

    /// Template section holding the parameter declarations
    #[arg(long, default_value = "parameters")]
    section: String,
}

pub async fn execute(args: FilterInputsArgs) -> Result<()> {
    let template = read_template(&args.template)?;
    let properties = read_properties(&args.properties)?;

    let native = NativeTemplateTranslator::new()
        .translate(&template)
        .map_err(InfrastructureError::from)?;

    let filter = InputFilter::new().with_section(&args.section);
    let inputs = filter
        .filter_used_properties(&native, &properties)
        .map_err(|e| InfrastructureError::InvalidTemplate(e.to_string()))?;

    info!(
        "{} of {} properties are declared by the template",
        inputs.len(),
        properties.len()
    );
    print_json(&inputs)
}
