//! Navigator: route from any authenticated page to an entity list view.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::actions::Actions;
use crate::config::EngineConfig;
use crate::result::{FormError, FormResult};

/// Entity types the engine can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Managed hosts
    Hosts,
    /// Puppet environments
    Environments,
}

impl EntityKind {
    /// Every kind
    pub const ALL: [Self; 2] = [Self::Hosts, Self::Environments];

    /// List route relative to the application root
    #[must_use]
    pub const fn route(&self) -> &'static str {
        match self {
            Self::Hosts => "/hosts",
            Self::Environments => "/environments",
        }
    }

    /// Singular noun used in messages
    #[must_use]
    pub const fn noun(&self) -> &'static str {
        match self {
            Self::Hosts => "host",
            Self::Environments => "environment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Positions the browser on list views
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    actions: Actions<'a>,
    config: &'a EngineConfig,
}

impl<'a> Navigator<'a> {
    /// Create a navigator
    #[must_use]
    pub const fn new(actions: Actions<'a>, config: &'a EngineConfig) -> Self {
        Self { actions, config }
    }

    /// Move to the list view of `kind`.
    ///
    /// Calling this from the list view itself does not reload the page.
    /// Always returns with the page settled.
    pub async fn go_to(&self, kind: EntityKind) -> FormResult<()> {
        let target = self.config.url_for(kind.route());
        let driver = self.actions.driver();
        let current = driver.current_url().await?;
        if same_page(&current, &target) {
            debug!(%kind, url = %target, "already on list view");
        } else {
            debug!(%kind, url = %target, "navigate");
            driver
                .navigate(&target)
                .await
                .map_err(|e| FormError::Navigation {
                    url: target.clone(),
                    message: e.to_string(),
                })?;
        }
        let _ = self.actions.settle().await?;
        Ok(())
    }
}

/// Compare URLs ignoring query, fragment and a trailing slash
fn same_page(current: &str, target: &str) -> bool {
    fn base(url: &str) -> &str {
        let end = url.find(['?', '#']).unwrap_or(url.len());
        url[..end].trim_end_matches('/')
    }
    base(current) == base(target)
}
