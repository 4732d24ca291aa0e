//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ColorChoice;

/// Formpilot: declarative host-form automation tooling
#[derive(Parser, Debug)]
#[command(name = "formpilot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine configuration file (YAML)
    #[arg(long, global = true, env = "FORMPILOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the locator registry covers every page object
    Validate(ValidateArgs),

    /// Print the form plan for an attribute file without a browser
    Plan(PlanArgs),

    /// Show the effective engine configuration
    Config(ConfigArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Locator file overlaid on the built-in table
    #[arg(short, long)]
    pub registry: Option<PathBuf>,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Host attribute document (YAML)
    #[arg(short, long)]
    pub attributes: PathBuf,

    /// Plan an update instead of a create
    #[arg(long)]
    pub update: bool,

    /// Compute resource for a create (defaults to the configured default)
    #[arg(long, conflicts_with = "update")]
    pub resource: Option<String>,

    /// Override the reset-environment policy
    #[arg(long)]
    pub reset_environment: Option<bool>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: PlanFormat,
}

/// Plan output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlanFormat {
    /// Numbered steps
    #[default]
    Text,
    /// JSON step list
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, loadable with `--config`
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
