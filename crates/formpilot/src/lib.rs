//! Formpilot: declarative entity automation for tabbed, AJAX-driven web forms
//!
//! A test describes the desired state of an entity as a sparse attribute
//! set; the engine turns it into locator resolutions, waits, clicks and
//! field writes against the live form, touching only what was supplied.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     FORMPILOT Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────┐   ┌─────────┐   ┌──────────┐  │
//! │  │ Page       │──►│ Form         │──►│ Actions │──►│ UiDriver │  │
//! │  │ Objects    │   │ Configurator │   │ + Waiter│   │ CDP/Mock │  │
//! │  └────────────┘   └──────────────┘   └─────────┘   └──────────┘  │
//! │        │                                  ▲                      │
//! │        └── Navigator / Bulk driver ───────┘                      │
//! │                    Locator Registry (key → strategy, selector)   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use formpilot::prelude::*;
//! use futures::FutureExt;
//!
//! # async fn run() -> FormResult<()> {
//! let driver = Arc::new(MockDriver::new());
//! Session::scoped(driver, EngineConfig::default(), |session| {
//!     async move {
//!         let attrs = HostAttributes::new()
//!             .with(HostField::Domain, "example.com")
//!             .with(HostField::Mac, "00:11:22:33:44:55");
//!         session.hosts()?.create(&HostCreate::new("host1").attributes(attrs)).await?;
//!         Ok(())
//!     }
//!     .boxed()
//! })
//! .await
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod actions;
pub mod bulk;
mod config;
mod driver;
pub mod form;
mod locator;
pub mod mock;
mod navigator;
pub mod pages;
mod registry;
mod result;
mod session;
mod wait;

/// Chromium backend over the DevTools protocol
#[cfg(feature = "browser")]
#[allow(clippy::missing_errors_doc)]
pub mod cdp;

pub use actions::Actions;
pub use bulk::{BulkAction, BulkActionDriver, BulkState};
pub use config::{EngineConfig, DEFAULT_RESOURCE_LABEL, DEFAULT_SETTLE_TIMEOUT_MS, ENV_PREFIX};
pub use driver::{DriverConfig, ElementHandle, ElementState, UiDriver};
pub use form::{
    FieldKind, FormConfigurator, FormMode, FormPlan, FormStep, HostAttributes, HostField, HostTab, NetworkTab,
    OsTab, PlanOptions, PuppetTab, TabGroup, VmTab,
};
pub use locator::{Locator, ResolvedLocator, Strategy, SLOT};
pub use mock::{MockDom, MockDriver, MockElement, MockEvent};
pub use navigator::{EntityKind, Navigator};
pub use pages::{ComputeResource, EnvironmentPage, HostCreate, HostPage, HostUpdate, PageObject};
pub use registry::{LocatorRegistry, RegistryFile};
pub use result::{FormError, FormResult};
pub use session::Session;
pub use wait::{Condition, WaitOptions, WaitResult, Waiter, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        BulkAction, ComputeResource, EngineConfig, EntityKind, FormError, FormResult, HostAttributes, HostCreate,
        HostField, HostUpdate, LocatorRegistry, MockDriver, MockElement, PageObject, Session, TabGroup, UiDriver,
    };
}
