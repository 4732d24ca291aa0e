//! Command handlers
//!
//! Each handler module keeps its rendering and checking logic in pure
//! functions; the `execute_*` entry point only adds printing.

pub mod config;
pub mod plan;
pub mod validate;

pub use config::{execute_config, render_config};
pub use plan::{execute_plan, load_attributes, plan_options, render_plan};
pub use validate::{check_registry, effective_registry, execute_validate, ValidationReport};
