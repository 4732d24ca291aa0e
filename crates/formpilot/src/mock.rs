//! Mock driver for unit testing and dry runs
//!
//! [`MockDriver`] keeps a tiny DOM keyed by resolved locator
//! (`strategy=selector`). Each key holds the list of elements that locator
//! matches. Interaction hooks registered per key let a test assemble a
//! behaving application: clicking a tab reveals its fields, selecting a host
//! group rewrites the environment, submitting stores a record.
//!
//! Asynchronous behaviour is simulated with two counters: `pending` is
//! reported (and decremented) by every `pending_requests` poll, and an
//! element's `appear_after` hides it for that many `find` polls.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::driver::{ElementState, UiDriver};
use crate::locator::ResolvedLocator;
use crate::result::{FormError, FormResult};

/// Interaction seen by a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// Page navigation
    Navigate(String),
    /// Click on a target
    Click(String),
    /// Option chosen on a target
    Select {
        /// Target key
        target: String,
        /// Chosen option
        value: String,
    },
    /// Target cleared
    Clear(String),
    /// Text typed into a target
    Type {
        /// Target key
        target: String,
        /// Typed text
        text: String,
    },
}

/// Callback run after an interaction on its target
pub type Hook = Arc<dyn Fn(&mut MockDom, &MockEvent) + Send + Sync>;

/// One element in the mock DOM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockElement {
    /// Lowercase tag name
    pub tag_name: String,
    /// Text content
    pub text: Option<String>,
    /// Current value
    pub value: String,
    /// Options offered by a select
    pub options: Vec<String>,
    /// Rendered
    pub visible: bool,
    /// Not disabled
    pub enabled: bool,
    /// Remaining `find` polls before the element shows up
    pub appear_after: u32,
}

impl MockElement {
    /// Visible, enabled element with a tag
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            visible: true,
            enabled: true,
            ..Self::default()
        }
    }

    /// Link or button with text
    #[must_use]
    pub fn link(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new("a")
        }
    }

    /// Text input with an initial value
    #[must_use]
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::new("input")
        }
    }

    /// Select offering the given options, none chosen
    #[must_use]
    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::new("select")
        }
    }

    /// Table cell with text
    #[must_use]
    pub fn cell(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new("td")
        }
    }

    /// Start hidden
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Start disabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Appear only after `polls` lookups
    #[must_use]
    pub const fn delayed(mut self, polls: u32) -> Self {
        self.appear_after = polls;
        self
    }

    /// Set the initial value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn state(&self) -> ElementState {
        ElementState {
            tag_name: self.tag_name.clone(),
            text: self.text.clone(),
            value: Some(self.value.clone()),
            visible: self.visible,
            enabled: self.enabled,
        }
    }
}

/// The mutable page behind a [`MockDriver`]
#[derive(Debug, Default)]
pub struct MockDom {
    /// Current URL
    pub url: String,
    /// Asynchronous requests still in flight
    pub pending: usize,
    /// Armed answer for the next confirmation dialog
    pub dialog: Option<bool>,
    /// Free-form records a simulated application can keep between pages
    pub records: BTreeMap<String, BTreeMap<String, String>>,
    elements: BTreeMap<String, Vec<MockElement>>,
}

impl MockDom {
    /// Replace every match of `target` with a single element
    pub fn insert(&mut self, target: impl Into<String>, element: MockElement) {
        let _ = self.elements.insert(target.into(), vec![element]);
    }

    /// Add one more match for `target`
    pub fn push(&mut self, target: impl Into<String>, element: MockElement) {
        self.elements.entry(target.into()).or_default().push(element);
    }

    /// Remove every match of `target`
    pub fn remove(&mut self, target: &str) {
        let _ = self.elements.remove(target);
    }

    /// Remove every element, keeping URL and records
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// First match of `target`
    #[must_use]
    pub fn get(&self, target: &str) -> Option<&MockElement> {
        self.elements.get(target).and_then(|v| v.first())
    }

    /// First match of `target`, mutably
    pub fn get_mut(&mut self, target: &str) -> Option<&mut MockElement> {
        self.elements.get_mut(target).and_then(|v| v.first_mut())
    }

    /// Whether `target` has any match
    #[must_use]
    pub fn contains(&self, target: &str) -> bool {
        self.elements.get(target).is_some_and(|v| !v.is_empty())
    }

    /// Show or hide every match of `target`
    pub fn set_visible(&mut self, target: &str, visible: bool) {
        if let Some(elements) = self.elements.get_mut(target) {
            for element in elements {
                element.visible = visible;
            }
        }
    }

    /// Set the value of the first match
    pub fn set_value(&mut self, target: &str, value: impl Into<String>) {
        if let Some(element) = self.get_mut(target) {
            element.value = value.into();
        }
    }

    /// Value of the first match
    #[must_use]
    pub fn value(&self, target: &str) -> Option<String> {
        self.get(target).map(|e| e.value.clone())
    }

    /// Consume the armed dialog answer
    pub fn take_dialog(&mut self) -> Option<bool> {
        self.dialog.take()
    }
}

/// Scriptable in-memory driver
#[derive(Default)]
pub struct MockDriver {
    dom: Mutex<MockDom>,
    hooks: Mutex<HashMap<String, Vec<Hook>>>,
    catch_all: Mutex<Vec<Hook>>,
    history: Mutex<Vec<String>>,
}

impl fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDriver")
            .field("dom", &*self.dom.lock())
            .field("hook_targets", &self.hooks.lock().len())
            .field("catch_all_hooks", &self.catch_all.lock().len())
            .field("history", &self.history.lock().len())
            .finish()
    }
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single element for `target`
    pub fn add_element(&self, target: impl Into<String>, element: MockElement) {
        self.dom.lock().insert(target, element);
    }

    /// Run `f` against the DOM
    pub fn with_dom<R>(&self, f: impl FnOnce(&mut MockDom) -> R) -> R {
        f(&mut self.dom.lock())
    }

    /// Register a hook fired after each interaction on `target`
    pub fn on<F>(&self, target: impl Into<String>, hook: F)
    where
        F: Fn(&mut MockDom, &MockEvent) + Send + Sync + 'static,
    {
        self.hooks
            .lock()
            .entry(target.into())
            .or_default()
            .push(Arc::new(hook));
    }

    /// Register a hook fired after every interaction, after target hooks
    pub fn on_any<F>(&self, hook: F)
    where
        F: Fn(&mut MockDom, &MockEvent) + Send + Sync + 'static,
    {
        self.catch_all.lock().push(Arc::new(hook));
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    /// Forget recorded calls
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Check if a call starting with `prefix` was made
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.history.lock().iter().any(|c| c.starts_with(prefix))
    }

    /// Count calls starting with `prefix`
    #[must_use]
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.history
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, entry: String) {
        self.history.lock().push(entry);
    }

    fn fire(&self, target: &str, event: &MockEvent) {
        let mut hooks: Vec<Hook> = self.hooks.lock().get(target).cloned().unwrap_or_default();
        hooks.extend(self.catch_all.lock().iter().cloned());
        if hooks.is_empty() {
            return;
        }
        let mut dom = self.dom.lock();
        for hook in hooks {
            hook(&mut dom, event);
        }
    }

    fn require(&self, target: &str) -> FormResult<()> {
        if self.dom.lock().contains(target) {
            Ok(())
        } else {
            Err(FormError::driver(format!("no element matches {target}")))
        }
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn navigate(&self, url: &str) -> FormResult<()> {
        self.record(format!("navigate:{url}"));
        self.dom.lock().url = url.to_string();
        self.fire(url, &MockEvent::Navigate(url.to_string()));
        Ok(())
    }

    async fn current_url(&self) -> FormResult<String> {
        Ok(self.dom.lock().url.clone())
    }

    async fn find(&self, locator: &ResolvedLocator) -> FormResult<Vec<ElementState>> {
        let target = locator.to_string();
        let mut dom = self.dom.lock();
        let Some(elements) = dom.elements.get_mut(&target) else {
            return Ok(Vec::new());
        };
        let mut found = Vec::new();
        for element in elements.iter_mut() {
            if element.appear_after > 0 {
                element.appear_after -= 1;
            } else {
                found.push(element.state());
            }
        }
        Ok(found)
    }

    async fn click(&self, locator: &ResolvedLocator) -> FormResult<()> {
        let target = locator.to_string();
        self.require(&target)?;
        self.record(format!("click:{target}"));
        self.fire(&target, &MockEvent::Click(target.clone()));
        Ok(())
    }

    async fn options(&self, locator: &ResolvedLocator) -> FormResult<Vec<String>> {
        let target = locator.to_string();
        self.require(&target)?;
        Ok(self
            .dom
            .lock()
            .get(&target)
            .map(|e| e.options.clone())
            .unwrap_or_default())
    }

    async fn select_option(&self, locator: &ResolvedLocator, value: &str) -> FormResult<()> {
        let target = locator.to_string();
        {
            let mut dom = self.dom.lock();
            let element = dom
                .get_mut(&target)
                .ok_or_else(|| FormError::driver(format!("no element matches {target}")))?;
            if !element.options.iter().any(|o| o == value) {
                return Err(FormError::driver(format!("{target} has no option '{value}'")));
            }
            element.value = value.to_string();
        }
        self.record(format!("select:{target}={value}"));
        self.fire(
            &target,
            &MockEvent::Select {
                target: target.clone(),
                value: value.to_string(),
            },
        );
        Ok(())
    }

    async fn clear(&self, locator: &ResolvedLocator) -> FormResult<()> {
        let target = locator.to_string();
        self.require(&target)?;
        self.dom.lock().set_value(&target, "");
        self.record(format!("clear:{target}"));
        self.fire(&target, &MockEvent::Clear(target.clone()));
        Ok(())
    }

    async fn type_text(&self, locator: &ResolvedLocator, text: &str) -> FormResult<()> {
        let target = locator.to_string();
        self.require(&target)?;
        if let Some(element) = self.dom.lock().get_mut(&target) {
            element.value.push_str(text);
        }
        self.record(format!("type:{target}={text}"));
        self.fire(
            &target,
            &MockEvent::Type {
                target: target.clone(),
                text: text.to_string(),
            },
        );
        Ok(())
    }

    async fn pending_requests(&self) -> FormResult<usize> {
        let mut dom = self.dom.lock();
        let pending = dom.pending;
        dom.pending = pending.saturating_sub(1);
        Ok(pending)
    }

    async fn arm_dialog(&self, accept: bool) -> FormResult<()> {
        self.record(format!("dialog:{}", if accept { "accept" } else { "dismiss" }));
        self.dom.lock().dialog = Some(accept);
        Ok(())
    }

    async fn close(&self) -> FormResult<()> {
        self.record("close".to_string());
        Ok(())
    }
}
