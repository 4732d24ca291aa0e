//! Config command handler

use formpilot::EngineConfig;

use crate::commands::ConfigFormat;
use crate::error::CliResult;
use crate::ConfigArgs;

/// Render the effective engine configuration
pub fn render_config(engine: &EngineConfig, format: ConfigFormat) -> CliResult<String> {
    match format {
        ConfigFormat::Yaml => Ok(serde_yaml_ng::to_string(engine)?),
        ConfigFormat::Json => Ok(serde_json::to_string_pretty(engine)? + "\n"),
    }
}

/// Execute the config command
pub fn execute_config(engine: &EngineConfig, args: &ConfigArgs) -> CliResult<()> {
    print!("{}", render_config(engine, args.format)?);
    Ok(())
}
