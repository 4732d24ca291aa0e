//! Engine configuration.
//!
//! Resolution order: built-in defaults, then an optional YAML file, then
//! `FORMPILOT_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::driver::DriverConfig;
use crate::registry::LocatorRegistry;
use crate::result::{FormError, FormResult};
use crate::wait::{WaitOptions, Waiter, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Label of the compute resource that needs no VM sizing
pub const DEFAULT_RESOURCE_LABEL: &str = "Bare Metal";

/// Default page-settle timeout (60 seconds)
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 60_000;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "FORMPILOT_";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Application root, e.g. `https://satellite.example.com`
    pub base_url: String,
    /// Global element wait timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Page-settle timeout in milliseconds
    pub settle_timeout_ms: u64,
    /// Compute resource label treated as "no VM sizing"
    pub default_resource: String,
    /// Locator file overlaid on the built-in table
    pub registry_path: Option<PathBuf>,
    /// Browser backend settings
    pub driver: DriverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://localhost"),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settle_timeout_ms: DEFAULT_SETTLE_TIMEOUT_MS,
            default_resource: DEFAULT_RESOURCE_LABEL.to_string(),
            registry_path: None,
            driver: DriverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the global wait timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the page-settle timeout
    #[must_use]
    pub const fn with_settle_timeout(mut self, settle_timeout_ms: u64) -> Self {
        self.settle_timeout_ms = settle_timeout_ms;
        self
    }

    /// Set the default compute resource label
    #[must_use]
    pub fn with_default_resource(mut self, label: impl Into<String>) -> Self {
        self.default_resource = label.into();
        self
    }

    /// Overlay a locator file on the built-in table
    #[must_use]
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry_path = Some(path.into());
        self
    }

    /// Set the browser backend settings
    #[must_use]
    pub fn with_driver(mut self, driver: DriverConfig) -> Self {
        self.driver = driver;
        self
    }

    /// Parse a YAML document; absent fields keep their defaults
    pub fn from_yaml_str(yaml: &str) -> FormResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> FormResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Defaults, then `path` if given, then the process environment
    pub fn load(path: Option<&Path>) -> FormResult<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `FORMPILOT_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> FormResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));
        let millis = |suffix: &str, raw: String| {
            raw.trim().parse::<u64>().map_err(|_| {
                FormError::config(format!("{ENV_PREFIX}{suffix} must be milliseconds, got '{raw}'"))
            })
        };

        if let Some(v) = var("BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = var("TIMEOUT_MS") {
            self.timeout_ms = millis("TIMEOUT_MS", v)?;
        }
        if let Some(v) = var("POLL_INTERVAL_MS") {
            self.poll_interval_ms = millis("POLL_INTERVAL_MS", v)?;
        }
        if let Some(v) = var("SETTLE_TIMEOUT_MS") {
            self.settle_timeout_ms = millis("SETTLE_TIMEOUT_MS", v)?;
        }
        if let Some(v) = var("DEFAULT_RESOURCE") {
            self.default_resource = v;
        }
        if let Some(v) = var("REGISTRY") {
            self.registry_path = Some(PathBuf::from(v));
        }
        if let Some(v) = var("DEVTOOLS_URL") {
            self.driver.devtools_url = Some(v);
        }
        if let Some(v) = var("TAB_URL_CONTAINS") {
            self.driver.tab_url_contains = Some(v);
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> FormResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(FormError::config("poll_interval_ms must be greater than zero"));
        }
        if self.default_resource.trim().is_empty() {
            return Err(FormError::config("default_resource must not be empty"));
        }
        Ok(())
    }

    /// Absolute URL for an application route
    #[must_use]
    pub fn url_for(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    /// Wait options derived from this config
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Waiter derived from this config
    #[must_use]
    pub const fn waiter(&self) -> Waiter {
        Waiter::new(self.wait_options(), self.settle_timeout_ms)
    }

    /// Built-in locators, overlaid with `registry_path` when set
    pub fn registry(&self) -> FormResult<LocatorRegistry> {
        let builtin = LocatorRegistry::builtin();
        match &self.registry_path {
            Some(path) => Ok(builtin.merge(LocatorRegistry::from_file(path)?)),
            None => Ok(builtin),
        }
    }
}
