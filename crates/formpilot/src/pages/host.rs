//! Host page object.

use async_trait::async_trait;
use std::fmt;
use tracing::{debug, info, info_span, Instrument};

use super::{PageObject, COMMON_KEYS};
use crate::form::{FormConfigurator, FormPlan, HostAttributes, HostField, PlanOptions, TabGroup};
use crate::navigator::EntityKind;
use crate::result::FormResult;
use crate::session::Session;

const HOST_KEYS: [&str; 11] = [
    "host.new",
    "host.name",
    "host.org",
    "host.loc",
    "host.deploy",
    "host.select_name",
    "host.edit",
    "host.dropdown",
    "host.delete",
    "host.checkbox",
    "host.row_org",
];

/// Compute resource a host is deployed on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComputeResource {
    /// The configured default (bare metal), no VM sizing
    #[default]
    Default,
    /// A named resource
    Named(String),
}

impl ComputeResource {
    /// Whether this resolves to the default label
    #[must_use]
    pub fn is_default(&self, default_label: &str) -> bool {
        match self {
            Self::Default => true,
            Self::Named(name) => name == default_label,
        }
    }

    /// Option label to choose in the deploy control
    #[must_use]
    pub fn label<'a>(&'a self, default_label: &'a str) -> &'a str {
        match self {
            Self::Default => default_label,
            Self::Named(name) => name,
        }
    }
}

impl From<&str> for ComputeResource {
    fn from(name: &str) -> Self {
        if name.eq_ignore_ascii_case("default") {
            Self::Default
        } else {
            Self::Named(name.to_string())
        }
    }
}

impl fmt::Display for ComputeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Arguments of [`HostPage::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCreate {
    /// Display name
    pub name: String,
    /// Organization
    pub organization: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Compute resource
    pub resource: ComputeResource,
    /// Sparse attribute set
    pub attributes: HostAttributes,
    /// Overrides the create default (reset on)
    pub reset_environment: Option<bool>,
}

impl HostCreate {
    /// Create a host with only a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the organization
    #[must_use]
    pub fn organization(mut self, org: impl Into<String>) -> Self {
        self.organization = Some(org.into());
        self
    }

    /// Set the location
    #[must_use]
    pub fn location(mut self, loc: impl Into<String>) -> Self {
        self.location = Some(loc.into());
        self
    }

    /// Set the compute resource
    #[must_use]
    pub fn resource(mut self, resource: impl Into<ComputeResource>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Set the attribute set
    #[must_use]
    pub fn attributes(mut self, attributes: HostAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Override the reset-environment default
    #[must_use]
    pub const fn reset_environment(mut self, reset: bool) -> Self {
        self.reset_environment = Some(reset);
        self
    }
}

/// Arguments of [`HostPage::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostUpdate {
    /// Name the host is currently listed under
    pub current_name: String,
    /// Rename target
    pub new_name: Option<String>,
    /// Sparse attribute set
    pub attributes: HostAttributes,
    /// Overrides the update default (reset off)
    pub reset_environment: Option<bool>,
}

impl HostUpdate {
    /// Update the host currently named `current_name`
    #[must_use]
    pub fn new(current_name: impl Into<String>) -> Self {
        Self {
            current_name: current_name.into(),
            ..Self::default()
        }
    }

    /// Rename the host
    #[must_use]
    pub fn rename(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }

    /// Set the attribute set
    #[must_use]
    pub fn attributes(mut self, attributes: HostAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Override the reset-environment default
    #[must_use]
    pub const fn reset_environment(mut self, reset: bool) -> Self {
        self.reset_environment = Some(reset);
        self
    }
}

/// Host page object
#[derive(Debug)]
pub struct HostPage<'a> {
    session: &'a Session,
}

impl<'a> HostPage<'a> {
    /// Bind to a session, failing if any host key is missing
    pub fn new(session: &'a Session) -> FormResult<Self> {
        let page = Self { session };
        page.validate()?;
        Ok(page)
    }

    /// Planning policy for a create request
    #[must_use]
    pub fn create_options(&self, request: &HostCreate) -> PlanOptions {
        let default_label = &self.session.config().default_resource;
        let mut options = PlanOptions::create().with_vm_sizing(!request.resource.is_default(default_label));
        if let Some(reset) = request.reset_environment {
            options = options.with_reset_environment(reset);
        }
        options
    }

    /// Planning policy for an update request
    #[must_use]
    pub fn update_options(request: &HostUpdate) -> PlanOptions {
        let options = PlanOptions::update();
        match request.reset_environment {
            Some(reset) => options.with_reset_environment(reset),
            None => options,
        }
    }

    /// Create a host and return the plan that configured it.
    ///
    /// The plan is computed before the browser is touched, so an invalid
    /// attribute set fails without side effects.
    pub async fn create(&self, request: &HostCreate) -> FormResult<FormPlan> {
        let plan = FormConfigurator::plan(&request.attributes, &self.create_options(request))?;
        let span = info_span!("host.create", name = %request.name, resource = %request.resource);
        async {
            let actions = self.session.actions();
            self.session.navigator().go_to(EntityKind::Hosts).await?;
            actions.click("host.new", None).await?;
            let _ = actions.settle().await?;

            actions.set_text("host.name", None, &request.name).await?;
            if let Some(org) = &request.organization {
                actions.select("host.org", None, org).await?;
                let _ = actions.settle().await?;
            }
            if let Some(loc) = &request.location {
                actions.select("host.loc", None, loc).await?;
                let _ = actions.settle().await?;
            }
            // installs without compute resources render no deploy selector
            let default_label = &self.session.config().default_resource;
            let implied = request.resource.is_default(default_label)
                && !actions.is_displayed("host.deploy", None).await?;
            if implied {
                debug!("no deploy selector, default resource implied");
            } else {
                actions.select("host.deploy", None, request.resource.label(default_label)).await?;
                let _ = actions.settle().await?;
            }

            FormConfigurator::apply(&actions, &plan).await?;
            actions.click("common.submit", None).await?;
            let _ = actions.settle().await?;
            info!(steps = plan.len(), "host created");
            Ok(plan)
        }
        .instrument(span)
        .await
    }

    /// Update an existing host and return the plan that configured it
    pub async fn update(&self, request: &HostUpdate) -> FormResult<FormPlan> {
        let plan = FormConfigurator::plan(&request.attributes, &Self::update_options(request))?;
        let span = info_span!("host.update", name = %request.current_name, rename = ?request.new_name);
        async {
            let actions = self.open_edit_form(&request.current_name).await?;
            if let Some(new_name) = &request.new_name {
                actions.set_text("host.name", None, new_name).await?;
            }
            FormConfigurator::apply(&actions, &plan).await?;
            actions.click("common.submit", None).await?;
            let _ = actions.settle().await?;
            info!(steps = plan.len(), "host updated");
            Ok(plan)
        }
        .instrument(span)
        .await
    }

    /// Read the requested fields back from the edit form.
    ///
    /// Each owning tab is activated once; fields come back in the returned
    /// attribute set, unset when the control is empty.
    pub async fn read_attributes(&self, name: &str, fields: &[HostField]) -> FormResult<HostAttributes> {
        let span = info_span!("host.read", name, fields = fields.len());
        async {
            let actions = self.open_edit_form(name).await?;
            let mut attrs = HostAttributes::new();
            for tab in TabGroup::ORDER {
                let wanted: Vec<HostField> = HostField::ALL
                    .into_iter()
                    .filter(|f| f.tab() == tab && fields.contains(f))
                    .collect();
                if wanted.is_empty() {
                    continue;
                }
                actions.click(tab.activation_key(), None).await?;
                for field in wanted {
                    if let Some(value) = actions.read_value(field.key(), None).await? {
                        attrs.set(field, value);
                    }
                }
            }
            Ok(attrs)
        }
        .instrument(span)
        .await
    }

    async fn open_edit_form(&self, name: &str) -> FormResult<crate::actions::Actions<'a>> {
        let _ = self.resolve(name).await?;
        let actions = self.session.actions();
        actions.click("host.select_name", Some(name)).await?;
        let _ = actions.settle().await?;
        actions.click("host.edit", None).await?;
        let _ = actions.settle().await?;
        Ok(actions)
    }
}

#[async_trait]
impl PageObject for HostPage<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::Hosts
    }

    fn session(&self) -> &Session {
        self.session
    }

    fn name_key(&self) -> &'static str {
        "host.select_name"
    }

    fn dropdown_key(&self) -> &'static str {
        "host.dropdown"
    }

    fn delete_key(&self) -> &'static str {
        "host.delete"
    }

    fn required_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = COMMON_KEYS.to_vec();
        keys.extend(HOST_KEYS);
        keys.extend(FormConfigurator::required_keys());
        keys
    }
}
