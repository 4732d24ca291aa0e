//! Formpilot CLI
//!
//! ## Usage
//!
//! ```bash
//! formpilot validate --registry locators.yaml   # Check locator coverage
//! formpilot plan --attributes host.yaml         # Dry-run a create
//! formpilot plan -a host.yaml --update -f json  # Dry-run an update as JSON
//! formpilot config --config formpilot.yaml      # Effective configuration
//! ```

use clap::Parser;
use console::style;
use formpilot::EngineConfig;
use formpilot_cli::{handlers, logging, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    console::set_colors_enabled(config.color.should_color());
    console::set_colors_enabled_stderr(config.color.should_color());
    logging::init_tracing(config.verbosity);

    let engine = EngineConfig::load(config.config_path.as_deref())?;

    match cli.command {
        Commands::Validate(args) => handlers::execute_validate(&config, &engine, &args),
        Commands::Plan(args) => handlers::execute_plan(&config, &engine, &args),
        Commands::Config(args) => handlers::execute_config(&engine, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_config_path(cli.config.clone())
}
