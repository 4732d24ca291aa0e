//! UiDriver - the seam between the engine and a browser.
//!
//! The engine never talks to a browser directly. Everything it needs
//! (element state, clicks, option lists, text entry, the count of in-flight
//! asynchronous requests) goes through this trait, so the same page objects
//! run against Chromium over CDP or against the in-memory [`MockDriver`].
//!
//! Driver methods act immediately and never wait; synchronization belongs
//! to [`crate::wait::Waiter`].
//!
//! [`MockDriver`]: crate::mock::MockDriver

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::locator::ResolvedLocator;
use crate::result::FormResult;

/// Snapshot of one matched element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// Lowercase tag name
    pub tag_name: String,
    /// Text content
    pub text: Option<String>,
    /// Current value (selected option label for selects)
    pub value: Option<String>,
    /// Rendered and not hidden
    pub visible: bool,
    /// Not disabled
    pub enabled: bool,
}

impl ElementState {
    /// Visible and enabled
    #[must_use]
    pub const fn is_clickable(&self) -> bool {
        self.visible && self.enabled
    }
}

/// An element located through the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Locator the element was found with
    pub locator: ResolvedLocator,
    /// State at the time it was found
    pub state: ElementState,
}

impl ElementHandle {
    /// Logical key of the element
    #[must_use]
    pub fn key(&self) -> &str {
        &self.locator.key
    }

    /// Trimmed text content, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.state.text.as_deref().map(str::trim)
    }
}

/// Connection settings for a browser backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// DevTools websocket of an already running, authenticated browser
    pub devtools_url: Option<String>,
    /// Attach to the first tab whose URL contains this text
    pub tab_url_contains: Option<String>,
    /// Timeout for a single backend request in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            devtools_url: None,
            tab_url_contains: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DevTools websocket URL
    #[must_use]
    pub fn devtools_url(mut self, url: impl Into<String>) -> Self {
        self.devtools_url = Some(url.into());
        self
    }

    /// Attach to a tab by URL fragment
    #[must_use]
    pub fn tab_url_contains(mut self, fragment: impl Into<String>) -> Self {
        self.tab_url_contains = Some(fragment.into());
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }
}

/// Abstract browser backend
///
/// # Implementations
///
/// - `ChromiumDriver` - attaches to Chromium over CDP (`browser` feature)
/// - `MockDriver` - scriptable in-memory DOM for tests and dry runs
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&self, url: &str) -> FormResult<()>;

    /// Get current URL
    async fn current_url(&self) -> FormResult<String>;

    /// State of every element matching the locator, in document order
    async fn find(&self, locator: &ResolvedLocator) -> FormResult<Vec<ElementState>>;

    /// Click the first match
    async fn click(&self, locator: &ResolvedLocator) -> FormResult<()>;

    /// Labels of the options offered by the first match
    async fn options(&self, locator: &ResolvedLocator) -> FormResult<Vec<String>>;

    /// Choose an option of the first match by label
    async fn select_option(&self, locator: &ResolvedLocator, value: &str) -> FormResult<()>;

    /// Clear the first match
    async fn clear(&self, locator: &ResolvedLocator) -> FormResult<()>;

    /// Type text into the first match
    async fn type_text(&self, locator: &ResolvedLocator, text: &str) -> FormResult<()>;

    /// Number of asynchronous requests still in flight (0 when the page is ready)
    async fn pending_requests(&self) -> FormResult<usize>;

    /// Decide how the next confirmation dialog will be answered
    async fn arm_dialog(&self, accept: bool) -> FormResult<()>;

    /// Release the browser connection
    async fn close(&self) -> FormResult<()>;
}
