//! Wait/Sync primitive.
//!
//! Cooperative polling with a bounded timeout. This is the only place the
//! engine suspends: every action waits here before touching an element, and
//! interactions that may trigger a partial page update wait here afterwards
//! for the page to settle.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Instant};
use tracing::{trace, warn};

use crate::driver::{ElementHandle, UiDriver};
use crate::locator::ResolvedLocator;
use crate::result::{FormError, FormResult};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// CONDITIONS
// =============================================================================

/// What an element must satisfy before it is acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Attached to the document
    Present,
    /// Attached and rendered
    Visible,
    /// Rendered and enabled
    Clickable,
}

impl Condition {
    /// Condition name for messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Visible => "visible",
            Self::Clickable => "clickable",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

// =============================================================================
// WAITER
// =============================================================================

/// Waiter for synchronization operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter {
    options: WaitOptions,
    settle_timeout_ms: u64,
}

impl Waiter {
    /// Create a waiter with a global default and a page-settle timeout
    #[must_use]
    pub const fn new(options: WaitOptions, settle_timeout_ms: u64) -> Self {
        Self {
            options,
            settle_timeout_ms,
        }
    }

    /// Global default options
    #[must_use]
    pub const fn options(&self) -> WaitOptions {
        self.options
    }

    /// Poll an async predicate until it holds.
    ///
    /// The predicate is always checked at least once, even with a zero
    /// timeout. Predicate errors abort the wait.
    pub async fn wait_for<F, Fut>(
        &self,
        description: &str,
        options: WaitOptions,
        mut predicate: F,
    ) -> FormResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FormResult<bool>>,
    {
        let start = Instant::now();
        loop {
            if predicate().await? {
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    waited_for: description.to_string(),
                });
            }
            if start.elapsed() >= options.timeout() {
                warn!(what = description, ms = options.timeout_ms, "wait timed out");
                return Err(FormError::SettleTimeout {
                    what: description.to_string(),
                    ms: options.timeout_ms,
                });
            }
            sleep(options.poll_interval()).await;
        }
    }

    /// Block until the located element satisfies `condition`.
    ///
    /// `timeout_ms` overrides the global default for this call only. On
    /// timeout the error names the logical key and the attempted selector.
    pub async fn await_element(
        &self,
        driver: &dyn UiDriver,
        locator: &ResolvedLocator,
        condition: Condition,
        timeout_ms: Option<u64>,
    ) -> FormResult<ElementHandle> {
        let options = timeout_ms.map_or(self.options, |ms| self.options.with_timeout(ms));
        let start = Instant::now();
        loop {
            let states = driver.find(locator).await?;
            let hit = states.into_iter().find(|s| match condition {
                Condition::Present => true,
                Condition::Visible => s.visible,
                Condition::Clickable => s.is_clickable(),
            });
            if let Some(state) = hit {
                trace!(key = %locator.key, %condition, elapsed_ms = start.elapsed().as_millis() as u64, "element ready");
                return Ok(ElementHandle {
                    locator: locator.clone(),
                    state,
                });
            }
            if start.elapsed() >= options.timeout() {
                warn!(key = %locator.key, selector = %locator, %condition, "element wait timed out");
                return Err(FormError::Timeout {
                    key: locator.key.clone(),
                    strategy: locator.strategy.to_string(),
                    selector: locator.selector.clone(),
                    condition: condition.to_string(),
                    ms: options.timeout_ms,
                });
            }
            sleep(options.poll_interval()).await;
        }
    }

    /// Block until nothing matches the locator (or nothing visible does)
    pub async fn await_absent(
        &self,
        driver: &dyn UiDriver,
        locator: &ResolvedLocator,
        timeout_ms: Option<u64>,
    ) -> FormResult<WaitResult> {
        let options = timeout_ms.map_or(self.options, |ms| self.options.with_timeout(ms));
        let what = format!("'{}' to disappear", locator.key);
        self.wait_for(&what, options, || async {
            Ok(driver.find(locator).await?.iter().all(|s| !s.visible))
        })
        .await
    }

    /// Block until the page reports no asynchronous work in flight
    pub async fn await_page_settled(&self, driver: &dyn UiDriver) -> FormResult<WaitResult> {
        let options = self.options.with_timeout(self.settle_timeout_ms);
        self.wait_for("page to settle", options, || async {
            Ok(driver.pending_requests().await? == 0)
        })
        .await
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::locator::Strategy;
    use crate::mock::{MockDriver, MockElement};

    fn fast() -> Waiter {
        Waiter::new(
            WaitOptions::new().with_timeout(100).with_poll_interval(2),
            100,
        )
    }

    fn loc(key: &str, selector: &str) -> ResolvedLocator {
        ResolvedLocator {
            key: key.into(),
            strategy: Strategy::Id,
            selector: selector.into(),
        }
    }

    mod options_tests {
        use super::*;

        #[test]
        fn test_wait_options_default() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_wait_options_builders() {
            let opts = WaitOptions::new().with_timeout(5000).with_poll_interval(10);
            assert_eq!(opts.timeout(), Duration::from_millis(5000));
            assert_eq!(opts.poll_interval(), Duration::from_millis(10));
        }

        #[test]
        fn test_condition_display() {
            assert_eq!(Condition::Present.to_string(), "present");
            assert_eq!(Condition::Clickable.to_string(), "clickable");
        }
    }

    mod clock_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_timeout_follows_runtime_clock() {
            let waiter = Waiter::new(
                WaitOptions::new().with_timeout(60_000).with_poll_interval(1_000),
                60_000,
            );
            let started = Instant::now();
            let err = waiter
                .wait_for("nothing", waiter.options(), || async { Ok(false) })
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(started.elapsed() >= Duration::from_secs(60));
            assert!(started.elapsed() < Duration::from_secs(62));
        }
    }

    mod element_tests {
        use super::*;

        #[tokio::test]
        async fn test_await_present_element() {
            let driver = MockDriver::new();
            driver.add_element("id=host_name", MockElement::input("").hidden());
            let handle = fast()
                .await_element(&driver, &loc("host.name", "host_name"), Condition::Present, None)
                .await
                .unwrap();
            assert_eq!(handle.key(), "host.name");
        }

        #[tokio::test]
        async fn test_hidden_element_is_not_visible() {
            let driver = MockDriver::new();
            driver.add_element("id=host_mac", MockElement::input("").hidden());
            let err = fast()
                .await_element(&driver, &loc("host.mac", "host_mac"), Condition::Visible, Some(20))
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            let msg = err.to_string();
            assert!(msg.contains("host.mac"));
            assert!(msg.contains("id=host_mac"));
            assert!(msg.contains("visible"));
        }

        #[tokio::test]
        async fn test_disabled_element_is_not_clickable() {
            let driver = MockDriver::new();
            driver.add_element("id=commit", MockElement::new("button").disabled());
            let err = fast()
                .await_element(&driver, &loc("common.submit", "commit"), Condition::Clickable, Some(10))
                .await
                .unwrap_err();
            assert!(matches!(err, FormError::Timeout { ref condition, .. } if condition == "clickable"));
        }

        #[tokio::test]
        async fn test_delayed_element_is_awaited() {
            let driver = MockDriver::new();
            driver.add_element("id=late", MockElement::input("").delayed(3));
            let handle = fast()
                .await_element(&driver, &loc("late", "late"), Condition::Visible, None)
                .await
                .unwrap();
            assert_eq!(handle.state.tag_name, "input");
        }

        #[tokio::test]
        async fn test_zero_timeout_checks_once() {
            let driver = MockDriver::new();
            driver.add_element("id=now", MockElement::input(""));
            assert!(fast()
                .await_element(&driver, &loc("now", "now"), Condition::Visible, Some(0))
                .await
                .is_ok());
        }

        #[tokio::test]
        async fn test_await_absent() {
            let driver = MockDriver::new();
            driver.add_element("id=spinner", MockElement::new("div").hidden());
            assert!(fast()
                .await_absent(&driver, &loc("spinner", "spinner"), None)
                .await
                .is_ok());

            driver.add_element("id=stuck", MockElement::new("div"));
            assert!(fast()
                .await_absent(&driver, &loc("stuck", "stuck"), Some(10))
                .await
                .unwrap_err()
                .is_timeout());
        }
    }

    mod settle_tests {
        use super::*;

        #[tokio::test]
        async fn test_page_settles_after_pending_drains() {
            let driver = MockDriver::new();
            driver.with_dom(|dom| dom.pending = 3);
            let result = fast().await_page_settled(&driver).await.unwrap();
            assert_eq!(result.waited_for, "page to settle");
            assert_eq!(driver.with_dom(|d| d.pending), 0);
        }

        #[tokio::test]
        async fn test_page_never_settles() {
            let driver = MockDriver::new();
            driver.with_dom(|dom| dom.pending = usize::MAX);
            let waiter = Waiter::new(WaitOptions::new().with_poll_interval(1), 10);
            let err = waiter.await_page_settled(&driver).await.unwrap_err();
            assert!(matches!(err, FormError::SettleTimeout { ms: 10, .. }));
        }

        #[tokio::test]
        async fn test_wait_for_propagates_predicate_error() {
            let err = fast()
                .wait_for("boom", WaitOptions::new().with_timeout(10), || async {
                    Err(FormError::driver("connection lost"))
                })
                .await
                .unwrap_err();
            assert!(matches!(err, FormError::Driver { .. }));
        }
    }
}
