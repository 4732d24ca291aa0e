//! Validate command handler

use console::style;
use formpilot::{EngineConfig, FormError, FormResult, LocatorRegistry, MockDriver, Session};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::ValidateArgs;

/// Outcome of a registry check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys in the effective registry
    pub keys: usize,
    /// Keys some page object needs but the registry lacks
    pub missing: Vec<String>,
}

/// Effective registry: built-in, then the configured file, then `overlay`
pub fn effective_registry(engine: &EngineConfig, overlay: Option<&std::path::Path>) -> CliResult<LocatorRegistry> {
    let registry = engine.registry()?;
    match overlay {
        Some(path) => Ok(registry.merge(LocatorRegistry::from_file(path)?)),
        None => Ok(registry),
    }
}

/// Bind every page object against `registry` and collect the missing keys
pub fn check_registry(engine: &EngineConfig, registry: LocatorRegistry) -> CliResult<ValidationReport> {
    let keys = registry.len();
    // page objects validate on construction; an offline driver is enough
    let session = Session::with_registry(Arc::new(MockDriver::new()), registry, engine.clone());
    let checks: [FormResult<()>; 3] = [
        session.hosts().map(|_| ()),
        session.environments().map(|_| ()),
        session.bulk().map(|_| ()),
    ];

    let mut missing = BTreeSet::new();
    for check in checks {
        match check {
            Ok(()) => {}
            Err(FormError::MissingLocators { keys }) => missing.extend(keys),
            Err(other) => return Err(other.into()),
        }
    }
    Ok(ValidationReport {
        keys,
        missing: missing.into_iter().collect(),
    })
}

/// Execute the validate command
pub fn execute_validate(config: &CliConfig, engine: &EngineConfig, args: &ValidateArgs) -> CliResult<()> {
    let registry = effective_registry(engine, args.registry.as_deref())?;
    let report = check_registry(engine, registry)?;
    if !report.missing.is_empty() {
        return Err(CliError::IncompleteRegistry {
            missing: report.missing,
        });
    }
    if !config.verbosity.is_quiet() {
        println!(
            "{} {} locator keys cover hosts, environments and bulk actions",
            style("ok").green().bold(),
            report.keys
        );
    }
    Ok(())
}
