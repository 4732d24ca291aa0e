//! Form Configurator for the host form.
//!
//! Configuration happens in two phases. [`FormConfigurator::plan`] is pure:
//! it partitions a sparse [`HostAttributes`] by tab and lays the supplied
//! fields out in a fixed application order, producing a [`FormPlan`].
//! [`FormConfigurator::apply`] walks that plan through the action
//! primitives. Keeping the plan inspectable lets tests and the CLI check
//! exactly which tabs are touched before any browser is involved.
//!
//! Order matters where one field repopulates another. Selecting a host
//! group rewrites the environment, so an explicit environment is written
//! after the host group and a settle. Domain drives the subnet list;
//! architecture drives the operating systems, which drive media and
//! partition tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info_span, Instrument};

use crate::actions::Actions;
use crate::result::{FormError, FormResult};

/// Default VM CPU count when the caller supplies none
pub const DEFAULT_VM_CPUS: &str = "1";

/// Default VM memory when the caller supplies none
pub const DEFAULT_VM_MEMORY: &str = "768 MB";

/// Registry key of the reset-environment control
pub const RESET_ENVIRONMENT_KEY: &str = "host.reset_puppetenv";

const PUPPET_MODULE_KEY: &str = "host.select_puppetmodule";
const PUPPET_CLASS_KEY: &str = "host.select_puppetclass";

// =============================================================================
// TAB GROUPS
// =============================================================================

/// Named region of the host form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabGroup {
    /// Host (primary) tab
    Host,
    /// Network interface tab
    Network,
    /// Operating system tab
    Os,
    /// Puppet classes tab
    Puppet,
    /// Virtual machine sizing tab
    Vm,
}

impl TabGroup {
    /// Application order
    pub const ORDER: [Self; 5] = [Self::Host, Self::Network, Self::Os, Self::Puppet, Self::Vm];

    /// Registry key of the tab's activation link
    #[must_use]
    pub const fn activation_key(&self) -> &'static str {
        match self {
            Self::Host => "tab.host.primary",
            Self::Network => "tab.host.network",
            Self::Os => "tab.host.os",
            Self::Puppet => "tab.host.puppet",
            Self::Vm => "tab.host.vm",
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Network => "network",
            Self::Os => "operating system",
            Self::Puppet => "puppet",
            Self::Vm => "virtual machine",
        }
    }
}

impl fmt::Display for TabGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// How a field is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Enumerated control
    Select,
    /// Free text
    Text,
}

/// Every value-carrying field of the host form, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostField {
    /// Lifecycle environment
    LifecycleEnvironment,
    /// Content view
    ContentView,
    /// Host group (rewrites environment)
    HostGroup,
    /// Puppet environment
    Environment,
    /// Puppet CA proxy
    PuppetCa,
    /// Puppet master proxy
    PuppetMaster,
    /// Domain (repopulates subnets)
    Domain,
    /// MAC address
    Mac,
    /// Subnet
    Subnet,
    /// IP address
    Ip,
    /// Architecture (repopulates operating systems)
    Architecture,
    /// Operating system (repopulates media and partition tables)
    OperatingSystem,
    /// Installation media
    Media,
    /// Partition table
    PartitionTable,
    /// Custom partition layout
    CustomPartitionTable,
    /// Root password
    RootPassword,
    /// VM CPU count
    Cpus,
    /// VM memory
    Memory,
    /// VM network type
    NetworkType,
    /// VM network
    Network,
}

impl HostField {
    /// All fields in application order
    pub const ALL: [Self; 20] = [
        Self::LifecycleEnvironment,
        Self::ContentView,
        Self::HostGroup,
        Self::Environment,
        Self::PuppetCa,
        Self::PuppetMaster,
        Self::Domain,
        Self::Mac,
        Self::Subnet,
        Self::Ip,
        Self::Architecture,
        Self::OperatingSystem,
        Self::Media,
        Self::PartitionTable,
        Self::CustomPartitionTable,
        Self::RootPassword,
        Self::Cpus,
        Self::Memory,
        Self::NetworkType,
        Self::Network,
    ];

    /// Owning tab
    #[must_use]
    pub const fn tab(&self) -> TabGroup {
        match self {
            Self::LifecycleEnvironment
            | Self::ContentView
            | Self::HostGroup
            | Self::Environment
            | Self::PuppetCa
            | Self::PuppetMaster => TabGroup::Host,
            Self::Domain | Self::Mac | Self::Subnet | Self::Ip => TabGroup::Network,
            Self::Architecture
            | Self::OperatingSystem
            | Self::Media
            | Self::PartitionTable
            | Self::CustomPartitionTable
            | Self::RootPassword => TabGroup::Os,
            Self::Cpus | Self::Memory | Self::NetworkType | Self::Network => TabGroup::Vm,
        }
    }

    /// Registry key of the field's control
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::LifecycleEnvironment => "host.lifecycle_env",
            Self::ContentView => "host.cv",
            Self::HostGroup => "host.group",
            Self::Environment => "host.environment",
            Self::PuppetCa => "host.puppet_ca",
            Self::PuppetMaster => "host.puppet_master",
            Self::Domain => "host.domain",
            Self::Mac => "host.mac",
            Self::Subnet => "host.subnet",
            Self::Ip => "host.ip",
            Self::Architecture => "host.arch",
            Self::OperatingSystem => "host.os",
            Self::Media => "host.media",
            Self::PartitionTable => "host.ptable",
            Self::CustomPartitionTable => "host.custom_ptable",
            Self::RootPassword => "host.root_pass",
            Self::Cpus => "host.vm_cpus",
            Self::Memory => "host.vm_memory",
            Self::NetworkType => "host.network_type",
            Self::Network => "host.network",
        }
    }

    /// Control type
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Mac | Self::Ip | Self::CustomPartitionTable | Self::RootPassword => FieldKind::Text,
            _ => FieldKind::Select,
        }
    }

    /// Writing this field triggers an asynchronous re-render of dependents
    #[must_use]
    pub const fn cascades(&self) -> bool {
        matches!(
            self,
            Self::HostGroup | Self::Domain | Self::Architecture | Self::OperatingSystem
        )
    }

    /// Value must not appear in logs or plan output
    #[must_use]
    pub const fn is_secret(&self) -> bool {
        matches!(self, Self::RootPassword)
    }

    /// Look a field up by registry key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for HostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

/// Host tab attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostTab {
    /// Lifecycle environment
    pub lifecycle_environment: Option<String>,
    /// Content view
    pub content_view: Option<String>,
    /// Host group
    pub host_group: Option<String>,
    /// Puppet environment
    pub environment: Option<String>,
    /// Puppet CA proxy
    pub puppet_ca: Option<String>,
    /// Puppet master proxy
    pub puppet_master: Option<String>,
}

/// Network tab attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkTab {
    /// Domain
    pub domain: Option<String>,
    /// MAC address
    pub mac: Option<String>,
    /// Subnet
    pub subnet: Option<String>,
    /// IP address
    pub ip: Option<String>,
}

/// Operating system tab attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OsTab {
    /// Architecture
    pub architecture: Option<String>,
    /// Operating system
    pub operating_system: Option<String>,
    /// Installation media
    pub media: Option<String>,
    /// Partition table
    pub partition_table: Option<String>,
    /// Custom partition layout
    pub custom_partition_table: Option<String>,
    /// Root password
    pub root_password: Option<String>,
}

/// Puppet tab attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PuppetTab {
    /// Module whose class is associated with the host
    pub module: Option<String>,
}

/// Virtual machine sizing attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VmTab {
    /// CPU count
    pub cpus: Option<String>,
    /// Memory
    pub memory: Option<String>,
    /// Network type
    pub network_type: Option<String>,
    /// Network
    pub network: Option<String>,
}

/// Sparse host attribute set, grouped by tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostAttributes {
    /// Host tab
    pub host: HostTab,
    /// Network tab
    pub network: NetworkTab,
    /// Operating system tab
    pub os: OsTab,
    /// Puppet tab
    pub puppet: PuppetTab,
    /// Virtual machine tab
    pub vm: VmTab,
}

impl HostAttributes {
    /// Empty attribute set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one field
    #[must_use]
    pub fn with(mut self, field: HostField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// Associate a puppet module
    #[must_use]
    pub fn with_puppet_module(mut self, module: impl Into<String>) -> Self {
        self.puppet.module = Some(module.into());
        self
    }

    /// Set one field
    pub fn set(&mut self, field: HostField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Value of one field, if supplied
    #[must_use]
    pub fn get(&self, field: HostField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Supplied fields of one tab, in application order
    #[must_use]
    pub fn supplied(&self, tab: TabGroup) -> Vec<(HostField, &str)> {
        HostField::ALL
            .into_iter()
            .filter(|f| f.tab() == tab)
            .filter_map(|f| self.get(f).map(|v| (f, v)))
            .collect()
    }

    /// Whether anything at all is supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puppet.module.is_none() && HostField::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    /// Whether the tab has at least one supplied attribute
    #[must_use]
    pub fn touches(&self, tab: TabGroup) -> bool {
        match tab {
            TabGroup::Puppet => self.puppet.module.is_some(),
            _ => !self.supplied(tab).is_empty(),
        }
    }

    const fn slot(&self, field: HostField) -> &Option<String> {
        match field {
            HostField::LifecycleEnvironment => &self.host.lifecycle_environment,
            HostField::ContentView => &self.host.content_view,
            HostField::HostGroup => &self.host.host_group,
            HostField::Environment => &self.host.environment,
            HostField::PuppetCa => &self.host.puppet_ca,
            HostField::PuppetMaster => &self.host.puppet_master,
            HostField::Domain => &self.network.domain,
            HostField::Mac => &self.network.mac,
            HostField::Subnet => &self.network.subnet,
            HostField::Ip => &self.network.ip,
            HostField::Architecture => &self.os.architecture,
            HostField::OperatingSystem => &self.os.operating_system,
            HostField::Media => &self.os.media,
            HostField::PartitionTable => &self.os.partition_table,
            HostField::CustomPartitionTable => &self.os.custom_partition_table,
            HostField::RootPassword => &self.os.root_password,
            HostField::Cpus => &self.vm.cpus,
            HostField::Memory => &self.vm.memory,
            HostField::NetworkType => &self.vm.network_type,
            HostField::Network => &self.vm.network,
        }
    }

    fn slot_mut(&mut self, field: HostField) -> &mut Option<String> {
        match field {
            HostField::LifecycleEnvironment => &mut self.host.lifecycle_environment,
            HostField::ContentView => &mut self.host.content_view,
            HostField::HostGroup => &mut self.host.host_group,
            HostField::Environment => &mut self.host.environment,
            HostField::PuppetCa => &mut self.host.puppet_ca,
            HostField::PuppetMaster => &mut self.host.puppet_master,
            HostField::Domain => &mut self.network.domain,
            HostField::Mac => &mut self.network.mac,
            HostField::Subnet => &mut self.network.subnet,
            HostField::Ip => &mut self.network.ip,
            HostField::Architecture => &mut self.os.architecture,
            HostField::OperatingSystem => &mut self.os.operating_system,
            HostField::Media => &mut self.os.media,
            HostField::PartitionTable => &mut self.os.partition_table,
            HostField::CustomPartitionTable => &mut self.os.custom_partition_table,
            HostField::RootPassword => &mut self.os.root_password,
            HostField::Cpus => &mut self.vm.cpus,
            HostField::Memory => &mut self.vm.memory,
            HostField::NetworkType => &mut self.vm.network_type,
            HostField::Network => &mut self.vm.network,
        }
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// One step of a form plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FormStep {
    /// Click a tab's activation link
    ActivateTab {
        /// Tab to activate
        tab: TabGroup,
    },
    /// Choose an option
    Select {
        /// Registry key
        key: &'static str,
        /// Option label
        value: String,
    },
    /// Replace text content
    SetText {
        /// Registry key
        key: &'static str,
        /// Text to write
        value: String,
    },
    /// Click a control
    Click {
        /// Registry key
        key: &'static str,
    },
    /// Select a puppet module, then add its class
    PuppetModule {
        /// Module name
        module: String,
    },
    /// Wait for asynchronous updates
    Settle,
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivateTab { tab } => write!(f, "activate {tab} tab"),
            Self::Select { key, value } => write!(f, "select {key} = {value}"),
            Self::SetText { key, value } => write!(f, "set {key} = {value}"),
            Self::Click { key } => write!(f, "click {key}"),
            Self::PuppetModule { module } => write!(f, "add puppet class of module {module}"),
            Self::Settle => f.write_str("wait for page to settle"),
        }
    }
}

/// Whether the form creates or edits a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// New host form
    Create,
    /// Edit form of an existing host
    Update,
}

/// Planning policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Create or update
    pub mode: FormMode,
    /// Click the reset-environment control
    pub reset_environment: bool,
    /// Fill the VM sizing tab (non-default compute resource)
    pub vm_sizing: bool,
}

impl PlanOptions {
    /// Create policy: reset on, no VM sizing
    #[must_use]
    pub const fn create() -> Self {
        Self {
            mode: FormMode::Create,
            reset_environment: true,
            vm_sizing: false,
        }
    }

    /// Update policy: reset off, never VM sizing
    #[must_use]
    pub const fn update() -> Self {
        Self {
            mode: FormMode::Update,
            reset_environment: false,
            vm_sizing: false,
        }
    }

    /// Override the reset-environment policy
    #[must_use]
    pub const fn with_reset_environment(mut self, reset: bool) -> Self {
        self.reset_environment = reset;
        self
    }

    /// Enable the VM sizing tab
    #[must_use]
    pub const fn with_vm_sizing(mut self, vm_sizing: bool) -> Self {
        self.vm_sizing = vm_sizing;
        self
    }
}

/// Ordered steps that configure the host form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormPlan {
    steps: Vec<FormStep>,
}

impl FormPlan {
    /// Steps in execution order
    #[must_use]
    pub fn steps(&self) -> &[FormStep] {
        &self.steps
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan does nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Tabs activated, in order
    #[must_use]
    pub fn activated_tabs(&self) -> Vec<TabGroup> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                FormStep::ActivateTab { tab } => Some(*tab),
                _ => None,
            })
            .collect()
    }

    /// Registry keys written or clicked, in order
    #[must_use]
    pub fn touched_keys(&self) -> Vec<&'static str> {
        self.steps
            .iter()
            .flat_map(|s| match s {
                FormStep::ActivateTab { tab } => vec![tab.activation_key()],
                FormStep::Select { key, .. } | FormStep::SetText { key, .. } | FormStep::Click { key } => {
                    vec![*key]
                }
                FormStep::PuppetModule { .. } => vec![PUPPET_MODULE_KEY, PUPPET_CLASS_KEY],
                FormStep::Settle => Vec::new(),
            })
            .collect()
    }

    /// Copy with secret values masked, for display
    #[must_use]
    pub fn redacted(&self) -> Self {
        let steps = self
            .steps
            .iter()
            .map(|step| match step {
                FormStep::SetText { key, .. } if HostField::from_key(key).is_some_and(|f| f.is_secret()) => {
                    FormStep::SetText {
                        key: *key,
                        value: "********".to_string(),
                    }
                }
                other => other.clone(),
            })
            .collect();
        Self { steps }
    }

    fn push(&mut self, step: FormStep) {
        if step == FormStep::Settle && self.steps.last() == Some(&FormStep::Settle) {
            return;
        }
        self.steps.push(step);
    }

    fn push_field(&mut self, field: HostField, value: &str) {
        let key = field.key();
        let value = value.to_string();
        self.push(match field.kind() {
            FieldKind::Select => FormStep::Select { key, value },
            FieldKind::Text => FormStep::SetText { key, value },
        });
        if field.cascades() {
            self.push(FormStep::Settle);
        }
    }
}

impl fmt::Display for FormPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.redacted().steps.iter().enumerate() {
            writeln!(f, "{:>3}. {step}", i + 1)?;
        }
        Ok(())
    }
}

// =============================================================================
// CONFIGURATOR
// =============================================================================

/// Plans and applies host form configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct FormConfigurator;

impl FormConfigurator {
    /// Every registry key a plan can reference
    #[must_use]
    pub fn required_keys() -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = TabGroup::ORDER.iter().map(TabGroup::activation_key).collect();
        keys.extend(HostField::ALL.iter().map(HostField::key));
        keys.extend([RESET_ENVIRONMENT_KEY, PUPPET_MODULE_KEY, PUPPET_CLASS_KEY]);
        keys
    }

    /// Lay out the supplied attributes as an ordered plan.
    ///
    /// Tabs follow [`TabGroup::ORDER`] and each is activated at most once,
    /// only when it has a supplied attribute. The reset-environment control
    /// is clicked whenever the policy asks for it, on the tab the form
    /// opens on. VM attributes need the VM sizing tab; supplying them
    /// without it is a configuration error rather than a silent drop.
    pub fn plan(attrs: &HostAttributes, options: &PlanOptions) -> FormResult<FormPlan> {
        let vm_sizing = options.vm_sizing && options.mode == FormMode::Create;
        if !vm_sizing && attrs.touches(TabGroup::Vm) {
            return Err(FormError::config(
                "VM attributes need a non-default compute resource on create",
            ));
        }

        let mut plan = FormPlan::default();
        for tab in TabGroup::ORDER {
            let start = plan.steps.len();
            match tab {
                TabGroup::Host => {
                    let fields = attrs.supplied(tab);
                    if !fields.is_empty() {
                        plan.push(FormStep::ActivateTab { tab });
                    }
                    let (before, after): (Vec<_>, Vec<_>) =
                        fields.into_iter().partition(|(f, _)| *f < HostField::HostGroup);
                    for (field, value) in before {
                        plan.push_field(field, value);
                    }
                    if options.reset_environment {
                        plan.push(FormStep::Click {
                            key: RESET_ENVIRONMENT_KEY,
                        });
                    }
                    for (field, value) in after {
                        plan.push_field(field, value);
                    }
                }
                TabGroup::Puppet => {
                    if let Some(module) = &attrs.puppet.module {
                        plan.push(FormStep::ActivateTab { tab });
                        plan.push(FormStep::PuppetModule {
                            module: module.clone(),
                        });
                    }
                }
                TabGroup::Vm => {
                    if vm_sizing {
                        plan.push(FormStep::ActivateTab { tab });
                        let cpus = attrs.get(HostField::Cpus).unwrap_or(DEFAULT_VM_CPUS);
                        let memory = attrs.get(HostField::Memory).unwrap_or(DEFAULT_VM_MEMORY);
                        plan.push_field(HostField::Cpus, cpus);
                        plan.push_field(HostField::Memory, memory);
                        for field in [HostField::NetworkType, HostField::Network] {
                            if let Some(value) = attrs.get(field) {
                                plan.push_field(field, value);
                            }
                        }
                    }
                }
                TabGroup::Network | TabGroup::Os => {
                    let fields = attrs.supplied(tab);
                    if !fields.is_empty() {
                        plan.push(FormStep::ActivateTab { tab });
                    }
                    for (field, value) in fields {
                        plan.push_field(field, value);
                    }
                }
            }
            if plan.steps[start..]
                .iter()
                .any(|s| matches!(s, FormStep::ActivateTab { .. }))
            {
                plan.push(FormStep::Settle);
            }
        }
        Ok(plan)
    }

    /// Execute a plan. The first failing step aborts; nothing is rolled back.
    pub async fn apply(actions: &Actions<'_>, plan: &FormPlan) -> FormResult<()> {
        for step in plan.steps() {
            match step {
                FormStep::ActivateTab { tab } => {
                    debug!(%tab, "activate tab");
                    actions.click(tab.activation_key(), None).await?;
                }
                FormStep::Select { key, value } => actions.select(key, None, value).await?,
                FormStep::SetText { key, value } => actions.set_text(key, None, value).await?,
                FormStep::Click { key } => actions.click(key, None).await?,
                FormStep::PuppetModule { module } => Self::associate_puppet_module(actions, module).await?,
                FormStep::Settle => {
                    let _ = actions.settle().await?;
                }
            }
        }
        Ok(())
    }

    /// Plan then apply
    pub async fn configure(actions: &Actions<'_>, attrs: &HostAttributes, options: &PlanOptions) -> FormResult<FormPlan> {
        let plan = Self::plan(attrs, options)?;
        let span = info_span!("configure", steps = plan.len(), tabs = ?plan.activated_tabs());
        Self::apply(actions, &plan).instrument(span).await?;
        Ok(plan)
    }

    /// Module click, then the class click templated by the same name
    async fn associate_puppet_module(actions: &Actions<'_>, module: &str) -> FormResult<()> {
        actions.click(PUPPET_MODULE_KEY, Some(module)).await?;
        match actions.click(PUPPET_CLASS_KEY, Some(module)).await {
            Err(e) if e.is_timeout() => Err(FormError::MissingPuppetClass {
                module: module.to_string(),
            }),
            other => other,
        }
    }
}
