//! Formpilot CLI Library
//!
//! Offline tooling around the engine: locator registry validation,
//! dry-run form plans and the effective configuration.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, ConfigFormat, PlanArgs, PlanFormat, ValidateArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
