//! Result and error types for formpilot.
//!
//! Every failure names the logical key (or entity) it concerns, never a bare
//! DOM error, so that a failing test stays diagnosable when the UI changes.

use thiserror::Error;

/// Result type for formpilot operations
pub type FormResult<T> = Result<T, FormError>;

/// Errors that can occur while driving an entity form
#[derive(Debug, Error)]
pub enum FormError {
    /// An element never reached the required condition
    #[error("Timed out after {ms}ms waiting for '{key}' to be {condition} ({strategy}={selector})")]
    Timeout {
        /// Logical locator key
        key: String,
        /// Lookup strategy that was attempted
        strategy: String,
        /// Resolved selector that was attempted
        selector: String,
        /// Condition that was awaited
        condition: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// The page never stopped updating
    #[error("Timed out after {ms}ms waiting for {what}")]
    SettleTimeout {
        /// What was being waited for
        what: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// A select target is not among the control's options
    #[error("Invalid option '{value}' for '{key}' (available: {})", available.join(", "))]
    InvalidOption {
        /// Logical locator key
        key: String,
        /// Requested value
        value: String,
        /// Options the control offered
        available: Vec<String>,
    },

    /// Entity search did not resolve to exactly one match
    #[error("Expected exactly one {entity} named '{name}', found {matches}")]
    Lookup {
        /// Entity type
        entity: String,
        /// Entity handle searched for
        name: String,
        /// Number of matches
        matches: usize,
    },

    /// Locator registry is missing keys referenced by a page object
    #[error("Missing locator keys: {}", keys.join(", "))]
    MissingLocators {
        /// Every missing key
        keys: Vec<String>,
    },

    /// Static configuration is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A puppet module offered no class to associate
    #[error("Puppet module '{module}' exposes no class to add")]
    MissingPuppetClass {
        /// Module name
        module: String,
    },

    /// Operation called in a state that does not allow it
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Browser backend error
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Element or page-settle timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::SettleTimeout { .. })
    }

    /// Select value absent from the control
    #[must_use]
    pub const fn is_invalid_option(&self) -> bool {
        matches!(self, Self::InvalidOption { .. })
    }

    /// Zero or several matches where one was expected
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }

    /// Registry, template or page-object configuration problem
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingLocators { .. } | Self::Config { .. } | Self::MissingPuppetClass { .. }
        )
    }
}
