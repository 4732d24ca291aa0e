//! Plan command handler
//!
//! Runs the form configurator's planning half against an attribute file,
//! so a test author can see which tabs and controls a create or update
//! would touch before any browser is involved.

use formpilot::{ComputeResource, EngineConfig, FormConfigurator, FormPlan, HostAttributes, PlanOptions};
use std::path::Path;
use tracing::debug;

use crate::commands::PlanFormat;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::PlanArgs;

/// Parse a YAML host attribute document
pub fn load_attributes(path: &Path) -> CliResult<HostAttributes> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_yaml_ng::from_str(&text)?)
}

/// Planning policy implied by the arguments
pub fn plan_options(engine: &EngineConfig, args: &PlanArgs) -> CliResult<PlanOptions> {
    let options = if args.update {
        PlanOptions::update()
    } else {
        let resource = match args.resource.as_deref().map(str::trim) {
            None => ComputeResource::Default,
            Some("") => {
                return Err(CliError::invalid_argument("--resource must name a compute resource"));
            }
            Some(name) => ComputeResource::from(name),
        };
        PlanOptions::create().with_vm_sizing(!resource.is_default(&engine.default_resource))
    };
    Ok(match args.reset_environment {
        Some(reset) => options.with_reset_environment(reset),
        None => options,
    })
}

/// Render a plan; secrets are always masked
pub fn render_plan(plan: &FormPlan, format: PlanFormat) -> CliResult<String> {
    match format {
        PlanFormat::Text if plan.is_empty() => Ok("nothing to do\n".to_string()),
        PlanFormat::Text => Ok(plan.to_string()),
        PlanFormat::Json => Ok(serde_json::to_string_pretty(&plan.redacted())?),
    }
}

/// Execute the plan command
pub fn execute_plan(config: &CliConfig, engine: &EngineConfig, args: &PlanArgs) -> CliResult<()> {
    let attrs = load_attributes(&args.attributes)?;
    let options = plan_options(engine, args)?;
    debug!(?options, "planning");
    let plan = FormConfigurator::plan(&attrs, &options)?;
    if config.verbosity.is_verbose() {
        eprintln!("tabs: {:?}", plan.activated_tabs());
        eprintln!("controls: {}", plan.touched_keys().join(", "));
    }
    print!("{}", render_plan(&plan, args.format)?);
    if args.format == PlanFormat::Json {
        println!();
    }
    Ok(())
}
