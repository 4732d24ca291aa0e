//! Locator abstraction: a lookup strategy plus a selector template.
//!
//! Templates carry at most one `{}` slot for a dynamic value (a host name
//! inside a list row, a puppet module inside an xpath). Locators are
//! resolved just before each use and never cached, because the page
//! replaces its DOM nodes on every asynchronous update.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::result::{FormError, FormResult};

/// Substitution slot inside a selector template
pub const SLOT: &str = "{}";

/// Strategy for locating elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Element `id` attribute
    Id,
    /// Form control `name` attribute
    Name,
    /// CSS selector
    Css,
    /// XPath expression
    #[serde(rename = "xpath")]
    XPath,
    /// Exact anchor text
    LinkText,
    /// Anchor text containing the selector
    PartialLinkText,
}

impl Strategy {
    /// Stable lowercase name, as used in registry files and error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::LinkText => "link_text",
            Self::PartialLinkText => "partial_link_text",
        }
    }

    /// JavaScript expression evaluating to an array of every matching element
    #[must_use]
    pub fn to_query(&self, selector: &str) -> String {
        let s = js_string(selector);
        match self {
            Self::Id => format!("[document.getElementById({s})].filter(Boolean)"),
            Self::Name => format!("Array.from(document.getElementsByName({s}))"),
            Self::Css => format!("Array.from(document.querySelectorAll({s}))"),
            Self::XPath => format!(
                "(() => {{ const r = document.evaluate({s}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 return Array.from({{length: r.snapshotLength}}, (_, i) => r.snapshotItem(i)); }})()"
            ),
            Self::LinkText => format!(
                "Array.from(document.querySelectorAll('a')).filter(a => a.textContent.trim() === {s})"
            ),
            Self::PartialLinkText => format!(
                "Array.from(document.querySelectorAll('a')).filter(a => a.textContent.includes({s}))"
            ),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote a value as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

/// A registry entry: strategy plus selector template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// Lookup strategy
    pub strategy: Strategy,
    /// Selector template with zero or one `{}` slot
    pub selector: String,
}

impl Locator {
    /// Create a locator, rejecting templates with more than one slot
    pub fn new(strategy: Strategy, selector: impl Into<String>) -> FormResult<Self> {
        let selector = selector.into();
        let slots = selector.matches(SLOT).count();
        if slots > 1 {
            return Err(FormError::config(format!(
                "selector '{selector}' has {slots} substitution slots, at most one is allowed"
            )));
        }
        Ok(Self { strategy, selector })
    }

    /// Shorthand for an `id` locator
    pub fn id(selector: impl Into<String>) -> FormResult<Self> {
        Self::new(Strategy::Id, selector)
    }

    /// Shorthand for an `xpath` locator
    pub fn xpath(selector: impl Into<String>) -> FormResult<Self> {
        Self::new(Strategy::XPath, selector)
    }

    /// Whether the template expects a dynamic value
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.selector.contains(SLOT)
    }

    /// Resolve the template for one use.
    ///
    /// A slotted template needs exactly one argument and a plain selector
    /// takes none; anything else is a configuration error.
    pub fn resolve(&self, key: &str, arg: Option<&str>) -> FormResult<ResolvedLocator> {
        let selector = match (self.is_template(), arg) {
            (true, Some(value)) => self.selector.replacen(SLOT, value, 1),
            (false, None) => self.selector.clone(),
            (true, None) => {
                return Err(FormError::config(format!(
                    "locator '{key}' is a template and needs a value"
                )))
            }
            (false, Some(value)) => {
                return Err(FormError::config(format!(
                    "locator '{key}' takes no value, got '{value}'"
                )))
            }
        };
        Ok(ResolvedLocator {
            key: key.to_string(),
            strategy: self.strategy,
            selector,
        })
    }
}

/// A locator bound to its logical key, ready for a single lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedLocator {
    /// Logical key the locator was resolved from
    pub key: String,
    /// Lookup strategy
    pub strategy: Strategy,
    /// Concrete selector
    pub selector: String,
}

impl ResolvedLocator {
    /// JavaScript expression returning all matches
    #[must_use]
    pub fn to_query(&self) -> String {
        self.strategy.to_query(&self.selector)
    }
}

impl fmt::Display for ResolvedLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.selector)
    }
}
