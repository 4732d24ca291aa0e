//! Locator Registry: logical key to `(strategy, selector)` mapping.
//!
//! The registry is validated when it is built (template slots) and again
//! when each page object is constructed (every key the page object uses
//! must be present), so a missing key surfaces at startup instead of in
//! the middle of filling a form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::locator::{Locator, ResolvedLocator, Strategy, SLOT};
use crate::result::{FormError, FormResult};

/// On-disk registry document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Logical key to locator
    #[serde(default)]
    pub locators: BTreeMap<String, Locator>,
}

/// Validated key to locator table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorRegistry {
    entries: BTreeMap<String, Locator>,
}

impl LocatorRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one entry
    pub fn insert(&mut self, key: impl Into<String>, locator: Locator) -> FormResult<()> {
        let key = key.into();
        let slots = locator.selector.matches(SLOT).count();
        if slots > 1 {
            return Err(FormError::config(format!(
                "locator '{key}' has {slots} substitution slots, at most one is allowed"
            )));
        }
        let _ = self.entries.insert(key, locator);
        Ok(())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, strategy: Strategy, selector: &str) -> FormResult<Self> {
        self.insert(key, Locator::new(strategy, selector)?)?;
        Ok(self)
    }

    /// Parse a registry document
    pub fn from_yaml_str(yaml: &str) -> FormResult<Self> {
        let file: RegistryFile = serde_yaml_ng::from_str(yaml)?;
        let mut registry = Self::new();
        for (key, locator) in file.locators {
            registry.insert(key, locator)?;
        }
        Ok(registry)
    }

    /// Load a registry document from disk
    pub fn from_file(path: impl AsRef<Path>) -> FormResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Overlay `other` on top of this registry; its entries win
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Serialize back to the document format
    pub fn to_yaml(&self) -> FormResult<String> {
        let file = RegistryFile {
            locators: self.entries.clone(),
        };
        Ok(serde_yaml_ng::to_string(&file)?)
    }

    /// Look up a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Locator> {
        self.entries.get(key)
    }

    /// Whether a key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Check that every key is present, reporting all missing keys at once
    pub fn require<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> FormResult<()> {
        let mut missing: Vec<String> = keys
            .into_iter()
            .filter(|k| !self.contains(k))
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        missing.dedup();
        Err(FormError::MissingLocators { keys: missing })
    }

    /// Resolve a key for one lookup
    pub fn resolve(&self, key: &str, arg: Option<&str>) -> FormResult<ResolvedLocator> {
        let locator = self.get(key).ok_or_else(|| FormError::MissingLocators {
            keys: vec![key.to_string()],
        })?;
        locator.resolve(key, arg)
    }

    /// Default table for the host-management UI
    #[must_use]
    pub fn builtin() -> Self {
        use Strategy::{Css, Id, LinkText, Name, XPath};

        let table: &[(&str, Strategy, &str)] = &[
            // common
            ("common.submit", Name, "commit"),
            ("common.search", Id, "search"),
            ("common.search_button", XPath, "//button[contains(@class,'btn') and @type='submit' and ancestor::form[@id='search-form']]"),
            ("common.notif_success", Css, "div.alert-success, div.jnotify-notification-success"),
            // tabs
            ("tab.host.primary", XPath, "//a[@href='#primary']"),
            ("tab.host.network", XPath, "//a[@href='#network']"),
            ("tab.host.os", XPath, "//a[@href='#os']"),
            ("tab.host.puppet", XPath, "//a[@href='#puppet_klasses']"),
            ("tab.host.vm", XPath, "//a[@href='#compute_resource']"),
            // host form
            ("host.new", XPath, "//a[contains(@href,'/hosts/new')]"),
            ("host.name", Id, "host_name"),
            ("host.org", Id, "host_organization_id"),
            ("host.loc", Id, "host_location_id"),
            ("host.deploy", Id, "host_compute_resource_id"),
            ("host.lifecycle_env", Id, "host_lifecycle_environment_id"),
            ("host.cv", Id, "host_content_view_id"),
            ("host.reset_puppetenv", XPath, "//a[contains(@onclick,'reset_puppet_environment')]"),
            ("host.group", Id, "host_hostgroup_id"),
            ("host.environment", Id, "host_environment_id"),
            ("host.puppet_ca", Id, "host_puppet_ca_proxy_id"),
            ("host.puppet_master", Id, "host_puppet_proxy_id"),
            ("host.domain", Id, "host_interfaces_attributes_0_domain_id"),
            ("host.mac", Id, "host_interfaces_attributes_0_mac"),
            ("host.subnet", Id, "host_interfaces_attributes_0_subnet_id"),
            ("host.ip", Id, "host_interfaces_attributes_0_ip"),
            ("host.arch", Id, "host_architecture_id"),
            ("host.os", Id, "host_operatingsystem_id"),
            ("host.media", Id, "host_medium_id"),
            ("host.ptable", Id, "host_ptable_id"),
            ("host.custom_ptable", Id, "host_disk"),
            ("host.root_pass", Id, "host_root_pass"),
            ("host.select_puppetmodule", XPath, "//li[@class='puppetclass_group']/a[normalize-space(.)='{}']"),
            ("host.select_puppetclass", XPath, "//ul[@id='puppetclasses_{}']//a[@data-original-title='Add class']"),
            ("host.vm_cpus", Id, "host_compute_attributes_cpus"),
            ("host.vm_memory", Id, "host_compute_attributes_memory"),
            ("host.network_type", Id, "host_interfaces_attributes_0_compute_attributes_type"),
            ("host.network", Id, "host_interfaces_attributes_0_compute_attributes_network"),
            // host list
            ("host.select_name", XPath, "//a[contains(@href,'/hosts/') and normalize-space(.)='{}']"),
            ("host.edit", XPath, "//a[contains(@href,'/edit') and normalize-space(.)='Edit']"),
            ("host.dropdown", XPath, "//a[normalize-space(.)='{}']/ancestor::tr//a[@data-toggle='dropdown']"),
            ("host.delete", XPath, "//a[@data-method='delete' and contains(@data-confirm,'{}')]"),
            ("host.checkbox", XPath, "//a[normalize-space(.)='{}']/ancestor::tr//input[@type='checkbox']"),
            ("host.row_org", XPath, "//a[normalize-space(.)='{}']/ancestor::tr/td[contains(@class,'organization')]"),
            ("host.row_loc", XPath, "//a[normalize-space(.)='{}']/ancestor::tr/td[contains(@class,'location')]"),
            // bulk actions
            ("host.select_action", XPath, "//div[@id='submit_multiple']/a[@data-toggle='dropdown']"),
            ("host.assign_org", LinkText, "Assign Organization"),
            ("host.assign_loc", LinkText, "Assign Location"),
            ("host.fix_mismatch", Id, "optionsRadios1"),
            ("host.select_org", Id, "organization_id"),
            ("host.select_loc", Id, "location_id"),
            ("host.bulk_submit", XPath, "//button[@onclick='submit_modal_form()']"),
            // environments
            ("env.new", XPath, "//a[contains(@href,'/environments/new')]"),
            ("env.name", Id, "environment_name"),
            ("env.select_name", XPath, "//a[contains(@href,'/environments/') and normalize-space(.)='{}']"),
            ("env.dropdown", XPath, "//a[normalize-space(.)='{}']/ancestor::tr//a[@data-toggle='dropdown']"),
            ("env.delete", XPath, "//a[@data-method='delete' and contains(@data-confirm,'{}')]"),
        ];

        let entries = table
            .iter()
            .map(|(key, strategy, selector)| {
                (
                    (*key).to_string(),
                    Locator {
                        strategy: *strategy,
                        selector: (*selector).to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
