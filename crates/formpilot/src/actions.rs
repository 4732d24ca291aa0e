//! Element Action Primitive.
//!
//! Every mutation is wait-then-act: the locator is resolved from the
//! registry at the moment of use, the waiter blocks until the element meets
//! the condition the action needs, and only then is the driver called.

use tracing::debug;

use crate::driver::UiDriver;
use crate::locator::ResolvedLocator;
use crate::registry::LocatorRegistry;
use crate::result::{FormError, FormResult};
use crate::wait::{Condition, WaitResult, Waiter};

/// Wait-then-act operations bound to one driver and registry
#[derive(Clone, Copy)]
pub struct Actions<'a> {
    driver: &'a dyn UiDriver,
    registry: &'a LocatorRegistry,
    waiter: Waiter,
}

impl std::fmt::Debug for Actions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("registry_len", &self.registry.len())
            .field("waiter", &self.waiter)
            .finish_non_exhaustive()
    }
}

impl<'a> Actions<'a> {
    /// Bind actions to a driver and registry
    #[must_use]
    pub const fn new(driver: &'a dyn UiDriver, registry: &'a LocatorRegistry, waiter: Waiter) -> Self {
        Self {
            driver,
            registry,
            waiter,
        }
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &'a dyn UiDriver {
        self.driver
    }

    /// Underlying waiter
    #[must_use]
    pub const fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    /// Resolve a key for one use
    pub fn locate(&self, key: &str, arg: Option<&str>) -> FormResult<ResolvedLocator> {
        self.registry.resolve(key, arg)
    }

    /// Wait for clickable, then click
    pub async fn click(&self, key: &str, arg: Option<&str>) -> FormResult<()> {
        let locator = self.locate(key, arg)?;
        let _ = self
            .waiter
            .await_element(self.driver, &locator, Condition::Clickable, None)
            .await?;
        debug!(key, selector = %locator, "click");
        self.driver.click(&locator).await
    }

    /// Wait for visible, then choose `value` among the control's options
    pub async fn select(&self, key: &str, arg: Option<&str>, value: &str) -> FormResult<()> {
        let locator = self.locate(key, arg)?;
        let _ = self
            .waiter
            .await_element(self.driver, &locator, Condition::Visible, None)
            .await?;
        let available = self.driver.options(&locator).await?;
        if !available.iter().any(|o| o == value) {
            return Err(FormError::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
                available,
            });
        }
        debug!(key, selector = %locator, value, "select");
        self.driver.select_option(&locator, value).await
    }

    /// Wait for visible, clear, then type; the previous content is replaced
    pub async fn set_text(&self, key: &str, arg: Option<&str>, text: &str) -> FormResult<()> {
        let locator = self.locate(key, arg)?;
        let _ = self
            .waiter
            .await_element(self.driver, &locator, Condition::Visible, None)
            .await?;
        debug!(key, selector = %locator, len = text.len(), "set text");
        self.driver.clear(&locator).await?;
        self.driver.type_text(&locator, text).await
    }

    /// Wait for present, then return the value (or text for non-form elements)
    pub async fn read_value(&self, key: &str, arg: Option<&str>) -> FormResult<Option<String>> {
        let locator = self.locate(key, arg)?;
        let handle = self
            .waiter
            .await_element(self.driver, &locator, Condition::Present, None)
            .await?;
        let value = match handle.state.tag_name.as_str() {
            "input" | "select" | "textarea" => handle.state.value,
            _ => handle.text().map(str::to_string),
        };
        Ok(value.filter(|v| !v.is_empty()))
    }

    /// Whether the element is present and visible right now (no wait)
    pub async fn is_displayed(&self, key: &str, arg: Option<&str>) -> FormResult<bool> {
        Ok(self.count_visible(key, arg).await? > 0)
    }

    /// Number of visible matches right now (no wait)
    pub async fn count_visible(&self, key: &str, arg: Option<&str>) -> FormResult<usize> {
        let locator = self.locate(key, arg)?;
        let states = self.driver.find(&locator).await?;
        Ok(states.iter().filter(|s| s.visible).count())
    }

    /// Wait for the page to finish asynchronous updates
    pub async fn settle(&self) -> FormResult<WaitResult> {
        self.waiter.await_page_settled(self.driver).await
    }

    /// Wait until nothing visible matches the key
    pub async fn await_gone(&self, key: &str, arg: Option<&str>) -> FormResult<WaitResult> {
        let locator = self.locate(key, arg)?;
        self.waiter.await_absent(self.driver, &locator, None).await
    }
}
