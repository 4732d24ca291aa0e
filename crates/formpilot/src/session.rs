//! Session: the explicitly passed handle every page object works through.
//!
//! A session owns the driver, the validated locator registry and the
//! engine configuration. [`Session::scoped`] guarantees the driver is
//! closed on every exit path of the work it runs.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, warn};

use crate::actions::Actions;
use crate::bulk::BulkActionDriver;
use crate::config::EngineConfig;
use crate::driver::UiDriver;
use crate::navigator::Navigator;
use crate::pages::{EnvironmentPage, HostPage};
use crate::registry::LocatorRegistry;
use crate::result::FormResult;

/// Driver, registry and configuration for one test
pub struct Session {
    driver: Arc<dyn UiDriver>,
    registry: LocatorRegistry,
    config: EngineConfig,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("registry_len", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session, loading the registry the config points at
    pub fn new(driver: Arc<dyn UiDriver>, config: EngineConfig) -> FormResult<Self> {
        config.validate()?;
        let registry = config.registry()?;
        Ok(Self::with_registry(driver, registry, config))
    }

    /// Build a session around an already assembled registry
    #[must_use]
    pub fn with_registry(driver: Arc<dyn UiDriver>, registry: LocatorRegistry, config: EngineConfig) -> Self {
        Self {
            driver,
            registry,
            config,
        }
    }

    /// Browser backend
    #[must_use]
    pub fn driver(&self) -> &dyn UiDriver {
        self.driver.as_ref()
    }

    /// Locator registry
    #[must_use]
    pub const fn registry(&self) -> &LocatorRegistry {
        &self.registry
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Wait-then-act primitives
    #[must_use]
    pub fn actions(&self) -> Actions<'_> {
        Actions::new(self.driver(), &self.registry, self.config.waiter())
    }

    /// List-view navigation
    #[must_use]
    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(self.actions(), &self.config)
    }

    /// Host page object; fails if the registry lacks any host key
    pub fn hosts(&self) -> FormResult<HostPage<'_>> {
        HostPage::new(self)
    }

    /// Environment page object; fails if the registry lacks any environment key
    pub fn environments(&self) -> FormResult<EnvironmentPage<'_>> {
        EnvironmentPage::new(self)
    }

    /// Bulk-action driver on the host list
    pub fn bulk(&self) -> FormResult<BulkActionDriver<'_>> {
        BulkActionDriver::new(self)
    }

    /// Release the browser connection
    pub async fn close(&self) -> FormResult<()> {
        self.driver.close().await
    }

    /// Run `work` inside a session and close the driver afterwards.
    ///
    /// The driver is closed when `work` succeeds, fails or panics, and when
    /// the session itself cannot be built. An error from `work` takes
    /// precedence over a teardown error; a panic is resumed after teardown.
    pub async fn scoped<T, F>(driver: Arc<dyn UiDriver>, config: EngineConfig, work: F) -> FormResult<T>
    where
        F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, FormResult<T>>,
    {
        let session = match Self::new(Arc::clone(&driver), config) {
            Ok(session) => session,
            Err(e) => {
                if let Err(teardown) = driver.close().await {
                    warn!(error = %teardown, "driver close failed after session setup error");
                }
                return Err(e);
            }
        };

        let outcome = AssertUnwindSafe(work(&session)).catch_unwind().await;
        let closed = session.close().await;
        info!(ok = matches!(outcome, Ok(Ok(_))), "session closed");

        match outcome {
            Err(panic) => std::panic::resume_unwind(panic),
            Ok(Err(e)) => {
                if let Err(teardown) = closed {
                    warn!(error = %teardown, "driver close failed after operation error");
                }
                Err(e)
            }
            Ok(Ok(value)) => closed.map(|()| value),
        }
    }
}
