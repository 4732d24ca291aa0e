//! A simulated host-management UI assembled on `MockDriver`.
//!
//! The app keeps its state in `MockDom::records` (`host:<name>`,
//! `env:<name>` plus a few bookkeeping entries) and re-renders pages from
//! it, so every read goes back through the same list views and forms the
//! engine drives. Dependent dropdowns repopulate and report pending
//! requests the way the real application does.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;
use std::sync::Arc;

use formpilot::{
    EngineConfig, FieldKind, HostField, LocatorRegistry, MockDom, MockDriver, MockElement, MockEvent, Session,
    TabGroup, SLOT,
};

pub const BASE: &str = "https://sat.example.com";
pub const ORGS: [&str; 2] = ["Org0", "Org1"];
pub const LOCS: [&str; 2] = ["Loc0", "Loc1"];
pub const RESOURCES: [&str; 2] = ["Bare Metal", "libvirt"];
pub const MODULES: [&str; 3] = ["ntp", "motd", "empty"];
const MODULES_WITH_CLASSES: [&str; 2] = ["ntp", "motd"];

const FORM: &str = "__form";
const PAGE: &str = "__page";
const SELECTED: &str = "__selected";
const BULK: &str = "__bulk";
const STATS: &str = "__stats";

type Record = BTreeMap<String, String>;

// =============================================================================
// OPTION TABLES
// =============================================================================

fn subnets(domain: &str) -> Vec<&'static str> {
    match domain {
        "example.com" => vec!["net10", "net20"],
        "example.org" => vec!["net30"],
        _ => vec![],
    }
}

fn systems(arch: &str) -> Vec<&'static str> {
    match arch {
        "x86_64" => vec!["RHEL 9", "RHEL 8", "Legacy OS"],
        "i386" => vec!["RHEL 6"],
        _ => vec![],
    }
}

fn group_environment(group: &str) -> Option<&'static str> {
    match group {
        "webservers" => Some("production_web"),
        "dbservers" => Some("development"),
        _ => None,
    }
}

fn options_for(field: HostField, values: &Record) -> Vec<&'static str> {
    let get = |f: HostField| values.get(f.key()).map_or("", String::as_str);
    match field {
        HostField::LifecycleEnvironment => vec!["Library", "Dev", "QA"],
        HostField::ContentView => vec!["Default Organization View", "cv1"],
        HostField::HostGroup => vec!["", "webservers", "dbservers"],
        HostField::Environment => vec!["production", "development", "production_web", "legacy_env"],
        HostField::PuppetCa | HostField::PuppetMaster => vec!["sat.example.com", "capsule.example.com"],
        HostField::Domain => vec!["example.com", "example.org"],
        HostField::Subnet => subnets(get(HostField::Domain)),
        HostField::Architecture => vec!["x86_64", "i386"],
        HostField::OperatingSystem => systems(get(HostField::Architecture)),
        HostField::Media if !get(HostField::OperatingSystem).is_empty() => vec!["RHEL mirror", "CentOS mirror"],
        HostField::PartitionTable if !get(HostField::OperatingSystem).is_empty() => {
            vec!["Kickstart default", "Custom LVM"]
        }
        HostField::Cpus => vec!["1", "2", "4"],
        HostField::Memory => vec!["768 MB", "2 GB", "4 GB"],
        HostField::NetworkType => vec!["bridge", "nat"],
        HostField::Network => vec!["default", "br0"],
        _ => vec![],
    }
}

// =============================================================================
// UI TARGETS
// =============================================================================

/// Resolves registry keys to the `strategy=selector` targets the mock DOM uses
#[derive(Debug, Clone)]
pub struct Ui {
    registry: LocatorRegistry,
}

impl Ui {
    pub fn new(registry: LocatorRegistry) -> Self {
        Self { registry }
    }

    pub fn t(&self, key: &str) -> String {
        self.registry.resolve(key, None).unwrap().to_string()
    }

    pub fn ta(&self, key: &str, arg: &str) -> String {
        self.registry.resolve(key, Some(arg)).unwrap().to_string()
    }

    /// Value substituted into a templated key, if `target` came from it
    pub fn arg_of(&self, key: &str, target: &str) -> Option<String> {
        let locator = self.registry.get(key)?;
        let full = format!("{}={}", locator.strategy, locator.selector);
        let (prefix, suffix) = full.split_once(SLOT)?;
        target
            .strip_prefix(prefix)?
            .strip_suffix(suffix)
            .map(str::to_string)
    }
}

// =============================================================================
// SIMULATED APPLICATION
// =============================================================================

struct SimulatedApp {
    ui: Ui,
}

impl SimulatedApp {
    fn install(driver: &MockDriver, registry: &LocatorRegistry) {
        let app = Self {
            ui: Ui::new(registry.clone()),
        };
        driver.with_dom(|dom| dom.url = "about:blank".into());
        driver.on_any(move |dom, event| app.handle(dom, event));
    }

    fn handle(&self, dom: &mut MockDom, event: &MockEvent) {
        match event {
            MockEvent::Navigate(url) => self.on_navigate(dom, url),
            MockEvent::Click(target) => self.on_click(dom, target),
            MockEvent::Select { target, value } => self.on_select(dom, target, value),
            MockEvent::Clear(_) | MockEvent::Type { .. } => {}
        }
    }

    fn on_navigate(&self, dom: &mut MockDom, url: &str) {
        if url == format!("{BASE}/hosts") {
            self.render_host_list(dom);
        } else if url == format!("{BASE}/environments") {
            self.render_env_list(dom);
        } else {
            dom.clear();
        }
        dom.pending = 1;
    }

    fn on_click(&self, dom: &mut MockDom, target: &str) {
        let u = &self.ui;
        if target == u.t("host.new") {
            self.open_host_form(dom, None);
        } else if target == u.t("host.edit") {
            let name = dom.records.get(PAGE).and_then(|p| p.get("host")).cloned();
            if let Some(name) = name {
                self.open_host_form(dom, Some(&name));
            }
        } else if target == u.t("common.search_button") {
            self.filter_list(dom);
        } else if target == u.t("common.submit") {
            self.submit(dom);
        } else if target == u.t("host.reset_puppetenv") {
            let _ = dom
                .records
                .entry(FORM.into())
                .or_default()
                .insert("reset".into(), "true".into());
        } else if let Some(tab) = TabGroup::ORDER
            .into_iter()
            .find(|t| target == u.t(t.activation_key()))
        {
            self.activate_tab(dom, tab);
        } else if target == u.t("host.select_action") {
            dom.insert(u.t("host.assign_org"), MockElement::link("Assign Organization"));
            dom.insert(u.t("host.assign_loc"), MockElement::link("Assign Location"));
        } else if target == u.t("host.assign_org") {
            self.open_bulk_modal(dom, "org");
        } else if target == u.t("host.assign_loc") {
            self.open_bulk_modal(dom, "loc");
        } else if target == u.t("host.fix_mismatch") {
            let _ = dom
                .records
                .entry(BULK.into())
                .or_default()
                .insert("fixed".into(), "true".into());
            bump(dom, "fix_mismatch");
        } else if target == u.t("host.bulk_submit") {
            self.bulk_submit(dom);
        } else if target == u.t("env.new") {
            self.open_env_form(dom);
        } else if let Some(name) = u.arg_of("host.select_name", target) {
            self.open_host_detail(dom, &name);
        } else if let Some(name) = u.arg_of("host.checkbox", target) {
            let selected = dom.records.entry(SELECTED.into()).or_default();
            if selected.remove(&name).is_none() {
                let _ = selected.insert(name, "true".into());
            }
        } else if let Some(name) = u.arg_of("host.dropdown", target) {
            dom.insert(u.ta("host.delete", &name), MockElement::link("Delete"));
        } else if let Some(name) = u.arg_of("host.delete", target) {
            self.delete_row(dom, &name);
        } else if let Some(module) = u.arg_of("host.select_puppetmodule", target) {
            if MODULES_WITH_CLASSES.contains(&module.as_str()) {
                dom.insert(u.ta("host.select_puppetclass", &module), MockElement::link("Add class"));
            }
        } else if let Some(module) = u.arg_of("host.select_puppetclass", target) {
            let _ = dom
                .records
                .entry(FORM.into())
                .or_default()
                .insert("puppet_module".into(), module);
        }
    }

    fn on_select(&self, dom: &mut MockDom, target: &str, value: &str) {
        let u = &self.ui;
        if target == u.t(HostField::HostGroup.key()) {
            if let Some(env) = group_environment(value) {
                dom.set_value(&u.t(HostField::Environment.key()), env);
            }
            // the webservers group pins its architecture on the OS tab
            if value == "webservers" {
                dom.set_value(&u.t(HostField::Architecture.key()), "i386");
                self.refresh_options(dom, HostField::OperatingSystem);
            }
            dom.pending = 2;
        } else if target == u.t(HostField::Domain.key()) {
            self.refresh_options(dom, HostField::Subnet);
            dom.pending = 1;
        } else if target == u.t(HostField::Architecture.key()) {
            self.refresh_options(dom, HostField::OperatingSystem);
            dom.pending = 1;
        } else if target == u.t(HostField::OperatingSystem.key()) {
            self.refresh_options(dom, HostField::Media);
            self.refresh_options(dom, HostField::PartitionTable);
            // legacy systems force their own puppet environment on the Host tab
            if value == "Legacy OS" {
                dom.set_value(&u.t(HostField::Environment.key()), "legacy_env");
            }
            dom.pending = 1;
        } else if target == u.t("host.deploy") {
            if value == RESOURCES[0] {
                dom.remove(&u.t(TabGroup::Vm.activation_key()));
                for field in HostField::ALL.into_iter().filter(|f| f.tab() == TabGroup::Vm) {
                    dom.remove(&u.t(field.key()));
                }
            } else {
                self.insert_vm_tab(dom, &Record::new());
            }
            dom.pending = 1;
        }
    }

    // -------------------------------------------------------------------------
    // host pages
    // -------------------------------------------------------------------------

    fn render_host_list(&self, dom: &mut MockDom) {
        let u = &self.ui;
        dom.clear();
        let _ = dom.records.remove(SELECTED);
        let _ = dom.records.remove(FORM);
        let _ = dom.records.remove(BULK);
        dom.url = format!("{BASE}/hosts");
        dom.insert(u.t("common.search"), MockElement::input(""));
        dom.insert(u.t("common.search_button"), MockElement::new("button"));
        dom.insert(u.t("host.new"), MockElement::link("Create Host"));
        dom.insert(u.t("host.select_action"), MockElement::link("Select Action"));
        for (name, record) in records_with_prefix(dom, "host:") {
            let link = u.ta("host.select_name", &name);
            dom.insert(link.clone(), MockElement::link(&name));
            if record.contains_key("duplicate") {
                dom.push(link, MockElement::link(&name));
            }
            dom.insert(u.ta("host.checkbox", &name), MockElement::new("input"));
            dom.insert(u.ta("host.dropdown", &name), MockElement::link("Actions"));
            let org = record.get("org").cloned().unwrap_or_default();
            let loc = record.get("loc").cloned().unwrap_or_default();
            dom.insert(u.ta("host.row_org", &name), MockElement::cell(org));
            dom.insert(u.ta("host.row_loc", &name), MockElement::cell(loc));
        }
    }

    fn open_host_detail(&self, dom: &mut MockDom, name: &str) {
        dom.clear();
        let _ = dom.records.remove(FORM);
        dom.url = format!("{BASE}/hosts/{name}");
        dom.insert(self.ui.t("host.edit"), MockElement::link("Edit"));
        let mut page = Record::new();
        let _ = page.insert("host".into(), name.into());
        let _ = dom.records.insert(PAGE.into(), page);
        dom.pending = 1;
    }

    fn open_host_form(&self, dom: &mut MockDom, editing: Option<&str>) {
        let u = &self.ui;
        let mut values = editing
            .and_then(|n| dom.records.get(&format!("host:{n}")).cloned())
            .unwrap_or_default();
        if editing.is_none() {
            let _ = values.insert(HostField::LifecycleEnvironment.key().into(), "Library".into());
        }

        dom.clear();
        dom.url = match editing {
            Some(n) => format!("{BASE}/hosts/{n}/edit"),
            None => format!("{BASE}/hosts/new"),
        };
        dom.insert(u.t("host.name"), MockElement::input(editing.unwrap_or("")));
        let org = values.get("org").cloned().unwrap_or_default();
        let loc = values.get("loc").cloned().unwrap_or_default();
        let resource = values.get("resource").cloned().unwrap_or_else(|| RESOURCES[0].into());
        dom.insert(u.t("host.org"), MockElement::select(ORGS).with_value(org));
        dom.insert(u.t("host.loc"), MockElement::select(LOCS).with_value(loc));
        dom.insert(u.t("host.deploy"), MockElement::select(RESOURCES).with_value(resource.clone()));

        for tab in [TabGroup::Host, TabGroup::Network, TabGroup::Os, TabGroup::Puppet] {
            dom.insert(u.t(tab.activation_key()), MockElement::link(tab.name()));
        }
        for field in HostField::ALL.into_iter().filter(|f| f.tab() != TabGroup::Vm) {
            self.insert_field(dom, field, &values, field.tab() == TabGroup::Host);
        }
        if resource != RESOURCES[0] {
            self.insert_vm_tab(dom, &values);
        }
        dom.insert(u.t("host.reset_puppetenv"), MockElement::link("Reset Puppet Environment"));
        for module in MODULES {
            dom.insert(u.ta("host.select_puppetmodule", module), MockElement::link(module).hidden());
        }
        dom.insert(u.t("common.submit"), MockElement::new("input"));

        let mut form = Record::new();
        let _ = form.insert("kind".into(), "host".into());
        if let Some(name) = editing {
            let _ = form.insert("editing".into(), name.into());
        }
        if let Some(module) = values.get("puppet_module") {
            let _ = form.insert("puppet_module".into(), module.clone());
        }
        let _ = dom.records.insert(FORM.into(), form);
        dom.pending = 1;
    }

    fn insert_field(&self, dom: &mut MockDom, field: HostField, values: &Record, visible: bool) {
        let value = values.get(field.key()).cloned().unwrap_or_default();
        let element = match field.kind() {
            FieldKind::Select => MockElement::select(options_for(field, values)),
            FieldKind::Text => MockElement::input(""),
        }
        .with_value(value);
        let element = if visible { element } else { element.hidden() };
        dom.insert(self.ui.t(field.key()), element);
    }

    fn insert_vm_tab(&self, dom: &mut MockDom, values: &Record) {
        dom.insert(
            self.ui.t(TabGroup::Vm.activation_key()),
            MockElement::link(TabGroup::Vm.name()),
        );
        for field in HostField::ALL.into_iter().filter(|f| f.tab() == TabGroup::Vm) {
            self.insert_field(dom, field, values, false);
        }
    }

    fn activate_tab(&self, dom: &mut MockDom, tab: TabGroup) {
        let u = &self.ui;
        for field in HostField::ALL {
            dom.set_visible(&u.t(field.key()), field.tab() == tab);
        }
        dom.set_visible(&u.t("host.reset_puppetenv"), tab == TabGroup::Host);
        for module in MODULES {
            dom.set_visible(&u.ta("host.select_puppetmodule", module), tab == TabGroup::Puppet);
            dom.set_visible(&u.ta("host.select_puppetclass", module), tab == TabGroup::Puppet);
        }
    }

    fn current_values(&self, dom: &MockDom) -> Record {
        HostField::ALL
            .into_iter()
            .filter_map(|f| {
                dom.value(&self.ui.t(f.key()))
                    .filter(|v| !v.is_empty())
                    .map(|v| (f.key().to_string(), v))
            })
            .collect()
    }

    fn refresh_options(&self, dom: &mut MockDom, field: HostField) {
        let values = self.current_values(dom);
        if let Some(element) = dom.get_mut(&self.ui.t(field.key())) {
            element.options = options_for(field, &values).into_iter().map(String::from).collect();
            element.value.clear();
        }
    }

    fn submit(&self, dom: &mut MockDom) {
        let form = dom.records.get(FORM).cloned().unwrap_or_default();
        match form.get("kind").map(String::as_str) {
            Some("host") => self.submit_host(dom, &form),
            Some("env") => self.submit_env(dom),
            _ => {}
        }
        dom.pending = 1;
    }

    fn submit_host(&self, dom: &mut MockDom, form: &Record) {
        let u = &self.ui;
        let name = dom.value(&u.t("host.name")).unwrap_or_default();
        if name.is_empty() {
            return;
        }
        let mut record = self.current_values(dom);
        for (column, key) in [("org", "host.org"), ("loc", "host.loc"), ("resource", "host.deploy")] {
            if let Some(value) = dom.value(&u.t(key)).filter(|v| !v.is_empty()) {
                let _ = record.insert(column.into(), value);
            }
        }
        if let Some(module) = form.get("puppet_module") {
            let _ = record.insert("puppet_module".into(), module.clone());
        }
        let previous = form
            .get("editing")
            .and_then(|old| dom.records.remove(&format!("host:{old}")));
        let resets = previous
            .as_ref()
            .and_then(|p| p.get("reset_count"))
            .and_then(|c| c.parse::<u32>().ok())
            .unwrap_or(0)
            + u32::from(form.contains_key("reset"));
        let _ = record.insert("reset_count".into(), resets.to_string());
        let _ = dom.records.insert(format!("host:{name}"), record);
        bump(dom, "host_saves");
        self.open_host_detail(dom, &name);
    }

    fn filter_list(&self, dom: &mut MockDom) {
        let query = dom.value(&self.ui.t("common.search")).unwrap_or_default();
        let (prefix, key) = if dom.url.ends_with("/environments") {
            ("env:", "env.select_name")
        } else {
            ("host:", "host.select_name")
        };
        for (name, _) in records_with_prefix(dom, prefix) {
            dom.set_visible(&self.ui.ta(key, &name), query.is_empty() || name == query);
        }
        dom.pending = 1;
    }

    fn delete_row(&self, dom: &mut MockDom, name: &str) {
        let confirmed = dom.take_dialog().unwrap_or(false);
        dom.remove(&self.ui.ta("host.delete", name));
        if !confirmed {
            return;
        }
        if dom.url.starts_with(&format!("{BASE}/environments")) {
            let _ = dom.records.remove(&format!("env:{name}"));
            self.render_env_list(dom);
            dom.insert(self.ui.t("common.notif_success"), MockElement::new("div").delayed(2));
        } else {
            let _ = dom.records.remove(&format!("host:{name}"));
            self.render_host_list(dom);
        }
        dom.pending = 1;
    }

    // -------------------------------------------------------------------------
    // bulk actions
    // -------------------------------------------------------------------------

    fn open_bulk_modal(&self, dom: &mut MockDom, kind: &str) {
        let u = &self.ui;
        dom.insert(u.t("host.fix_mismatch"), MockElement::new("input"));
        if kind == "loc" {
            dom.insert(u.t("host.select_loc"), MockElement::select(LOCS));
        } else {
            dom.insert(u.t("host.select_org"), MockElement::select(ORGS));
        }
        dom.insert(u.t("host.bulk_submit"), MockElement::new("button"));
        let mut bulk = Record::new();
        let _ = bulk.insert("kind".into(), kind.into());
        let _ = dom.records.insert(BULK.into(), bulk);
        dom.pending = 1;
    }

    fn bulk_submit(&self, dom: &mut MockDom) {
        let bulk = dom.records.get(BULK).cloned().unwrap_or_default();
        let (column, select_key) = if bulk.get("kind").map(String::as_str) == Some("loc") {
            ("loc", "host.select_loc")
        } else {
            ("org", "host.select_org")
        };
        let target = dom.value(&self.ui.t(select_key)).unwrap_or_default();
        let fixed = bulk.contains_key("fixed");
        let selected: Vec<String> = dom
            .records
            .get(SELECTED)
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default();
        for name in selected {
            if let Some(record) = dom.records.get_mut(&format!("host:{name}")) {
                let current = record.get(column).cloned().unwrap_or_default();
                // without "fix mismatch" the app skips hosts already associated elsewhere
                if current.is_empty() || current == target || fixed {
                    let _ = record.insert(column.into(), target.clone());
                }
            }
        }
        self.render_host_list(dom);
        dom.pending = 1;
    }

    // -------------------------------------------------------------------------
    // environments
    // -------------------------------------------------------------------------

    fn render_env_list(&self, dom: &mut MockDom) {
        let u = &self.ui;
        dom.clear();
        let _ = dom.records.remove(FORM);
        dom.url = format!("{BASE}/environments");
        dom.insert(u.t("common.search"), MockElement::input(""));
        dom.insert(u.t("common.search_button"), MockElement::new("button"));
        dom.insert(u.t("env.new"), MockElement::link("Create Puppet Environment"));
        for (name, _) in records_with_prefix(dom, "env:") {
            dom.insert(u.ta("env.select_name", &name), MockElement::link(&name));
            dom.insert(u.ta("env.dropdown", &name), MockElement::link("Actions"));
        }
    }

    fn open_env_form(&self, dom: &mut MockDom) {
        dom.clear();
        dom.url = format!("{BASE}/environments/new");
        dom.insert(self.ui.t("env.name"), MockElement::input(""));
        dom.insert(self.ui.t("common.submit"), MockElement::new("input"));
        let mut form = Record::new();
        let _ = form.insert("kind".into(), "env".into());
        let _ = dom.records.insert(FORM.into(), form);
        dom.pending = 1;
    }

    fn submit_env(&self, dom: &mut MockDom) {
        let name = dom.value(&self.ui.t("env.name")).unwrap_or_default();
        if name.is_empty() {
            return;
        }
        let _ = dom.records.insert(format!("env:{name}"), Record::new());
        self.render_env_list(dom);
        dom.insert(self.ui.t("common.notif_success"), MockElement::new("div"));
    }
}

fn records_with_prefix(dom: &MockDom, prefix: &str) -> Vec<(String, Record)> {
    dom.records
        .iter()
        .filter_map(|(k, v)| k.strip_prefix(prefix).map(|n| (n.to_string(), v.clone())))
        .collect()
}

fn bump(dom: &mut MockDom, stat: &str) {
    let stats = dom.records.entry(STATS.into()).or_default();
    let count = stats.get(stat).and_then(|c| c.parse::<u32>().ok()).unwrap_or(0) + 1;
    let _ = stats.insert(stat.into(), count.to_string());
}

// =============================================================================
// HARNESS
// =============================================================================

/// Driver, session and target helpers for one test
pub struct Harness {
    pub driver: Arc<MockDriver>,
    pub session: Session,
    pub ui: Ui,
}

/// App and session both on the built-in locators
pub fn harness() -> Harness {
    harness_with(LocatorRegistry::builtin())
}

/// A driver with the simulated app installed on the built-in locators
pub fn app_driver() -> Arc<MockDriver> {
    let driver = Arc::new(MockDriver::new());
    SimulatedApp::install(&driver, &LocatorRegistry::builtin());
    driver
}

/// Short waits so failing lookups finish quickly
pub fn engine_config() -> EngineConfig {
    EngineConfig::new()
        .with_base_url(BASE)
        .with_timeout(200)
        .with_poll_interval(1)
        .with_settle_timeout(200)
}

/// App on the built-in locators, session on `registry`
pub fn harness_with(registry: LocatorRegistry) -> Harness {
    let driver = app_driver();
    let session = Session::with_registry(driver.clone(), registry, engine_config());
    Harness {
        driver,
        session,
        ui: Ui::new(LocatorRegistry::builtin()),
    }
}

impl Harness {
    pub fn host(&self, name: &str) -> Option<Record> {
        self.driver
            .with_dom(|d| d.records.get(&format!("host:{name}")).cloned())
    }

    pub fn host_names(&self) -> Vec<String> {
        self.driver
            .with_dom(|d| records_with_prefix(d, "host:").into_iter().map(|(n, _)| n).collect())
    }

    pub fn environment_exists(&self, name: &str) -> bool {
        self.driver
            .with_dom(|d| d.records.contains_key(&format!("env:{name}")))
    }

    pub fn seed_host(&self, name: &str, fields: &[(&str, &str)]) {
        let record: Record = fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.driver.with_dom(|d| {
            let _ = d.records.insert(format!("host:{name}"), record);
        });
    }

    pub fn seed_environment(&self, name: &str) {
        self.driver.with_dom(|d| {
            let _ = d.records.insert(format!("env:{name}"), Record::new());
        });
    }

    pub fn stat(&self, stat: &str) -> u32 {
        self.driver.with_dom(|d| {
            d.records
                .get(STATS)
                .and_then(|s| s.get(stat))
                .and_then(|c| c.parse().ok())
                .unwrap_or(0)
        })
    }

    /// Exact number of clicks on a plain key
    pub fn clicks(&self, key: &str) -> usize {
        let entry = format!("click:{}", self.ui.t(key));
        self.driver.history().iter().filter(|c| **c == entry).count()
    }

    /// Index of the first history entry equal to `entry`
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.driver.history().iter().position(|c| c == entry)
    }
}
