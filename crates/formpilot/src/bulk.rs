//! Bulk-Action Driver.
//!
//! Applies an action to a checkbox-selected subset of the host list:
//!
//! ```text
//! Unselected -> Selected(set) -> ActionMenuOpen -> [MismatchResolution] -> ActionApplied
//! ```
//!
//! The mismatch sub-state is entered only when a selected host already
//! belongs to a different organization (or location) than the target.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info, info_span, Instrument};

use crate::navigator::EntityKind;
use crate::result::{FormError, FormResult};
use crate::session::Session;

const BULK_KEYS: [&str; 11] = [
    "host.checkbox",
    "host.row_org",
    "host.row_loc",
    "host.select_action",
    "host.assign_org",
    "host.assign_loc",
    "host.fix_mismatch",
    "host.select_org",
    "host.select_loc",
    "host.bulk_submit",
    "host.select_name",
];

/// Bulk action on the host list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    /// Move hosts to an organization
    AssignOrganization(String),
    /// Move hosts to a location
    AssignLocation(String),
}

impl BulkAction {
    /// Target organization or location
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::AssignOrganization(t) | Self::AssignLocation(t) => t,
        }
    }

    /// Key of the action's entry in the action menu
    #[must_use]
    pub const fn menu_key(&self) -> &'static str {
        match self {
            Self::AssignOrganization(_) => "host.assign_org",
            Self::AssignLocation(_) => "host.assign_loc",
        }
    }

    /// Key of the list column holding the host's current value
    #[must_use]
    pub const fn column_key(&self) -> &'static str {
        match self {
            Self::AssignOrganization(_) => "host.row_org",
            Self::AssignLocation(_) => "host.row_loc",
        }
    }

    /// Key of the target select in the action dialog
    #[must_use]
    pub const fn select_key(&self) -> &'static str {
        match self {
            Self::AssignOrganization(_) => "host.select_org",
            Self::AssignLocation(_) => "host.select_loc",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssignOrganization(t) => write!(f, "assign organization {t}"),
            Self::AssignLocation(t) => write!(f, "assign location {t}"),
        }
    }
}

/// Bulk-action state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BulkState {
    /// Nothing selected
    #[default]
    Unselected,
    /// Hosts checked in the list
    Selected(BTreeSet<String>),
    /// Action menu open for the selection
    ActionMenuOpen(BTreeSet<String>),
    /// Action conflicts with current associations; fix-mismatch confirmed
    MismatchResolution {
        /// Selected hosts
        hosts: BTreeSet<String>,
        /// Chosen action
        action: BulkAction,
    },
    /// Action submitted
    ActionApplied {
        /// Hosts the action was applied to
        hosts: BTreeSet<String>,
        /// Applied action
        action: BulkAction,
    },
}

impl BulkState {
    /// State name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unselected => "unselected",
            Self::Selected(_) => "selected",
            Self::ActionMenuOpen(_) => "action_menu_open",
            Self::MismatchResolution { .. } => "mismatch_resolution",
            Self::ActionApplied { .. } => "action_applied",
        }
    }
}

impl fmt::Display for BulkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drives one bulk action through its states
#[derive(Debug)]
pub struct BulkActionDriver<'a> {
    session: &'a Session,
    state: BulkState,
    trail: Vec<&'static str>,
}

impl<'a> BulkActionDriver<'a> {
    /// Bind to a session, failing if any bulk key is missing
    pub fn new(session: &'a Session) -> FormResult<Self> {
        session.registry().require(BULK_KEYS)?;
        Ok(Self {
            session,
            state: BulkState::Unselected,
            trail: vec![BulkState::Unselected.name()],
        })
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &BulkState {
        &self.state
    }

    /// Names of every state entered so far, in order
    #[must_use]
    pub fn trail(&self) -> &[&'static str] {
        &self.trail
    }

    /// Whether the last applied action went through mismatch resolution
    #[must_use]
    pub fn resolved_mismatch(&self) -> bool {
        self.trail.contains(&"mismatch_resolution")
    }

    /// Return to `Unselected` without touching the page
    pub fn reset(&mut self) {
        self.enter(BulkState::Unselected);
    }

    fn enter(&mut self, state: BulkState) {
        debug!(from = %self.state, to = %state, "bulk transition");
        self.trail.push(state.name());
        self.state = state;
    }

    fn illegal(&self, operation: &str) -> FormError {
        FormError::invalid_state(format!("cannot {operation} while {}", self.state))
    }

    /// Check the listed hosts' boxes. Allowed from `Unselected` (which first
    /// opens the host list) and from `Selected` (which adds to the set).
    pub async fn select<S: AsRef<str> + Sync>(&mut self, names: &[S]) -> FormResult<()> {
        if names.is_empty() {
            return Err(FormError::invalid_state("bulk selection needs at least one host"));
        }
        let mut selected = match &self.state {
            BulkState::Unselected => {
                self.session.navigator().go_to(EntityKind::Hosts).await?;
                BTreeSet::new()
            }
            BulkState::Selected(set) => set.clone(),
            _ => return Err(self.illegal("select hosts")),
        };
        let actions = self.session.actions();
        for name in names {
            let name = name.as_ref();
            if selected.contains(name) {
                continue;
            }
            actions.click("host.checkbox", Some(name)).await?;
            let _ = selected.insert(name.to_string());
        }
        self.enter(BulkState::Selected(selected));
        Ok(())
    }

    /// Open the action menu for the current selection
    pub async fn open_action_menu(&mut self) -> FormResult<()> {
        let BulkState::Selected(selected) = &self.state else {
            return Err(self.illegal("open the action menu"));
        };
        let selected = selected.clone();
        self.session.actions().click("host.select_action", None).await?;
        self.enter(BulkState::ActionMenuOpen(selected));
        Ok(())
    }

    /// Choose `action` from the open menu and submit it.
    ///
    /// Each selected row's current value is read first; any host whose
    /// value differs from the target puts the driver into mismatch
    /// resolution, which clicks "fix mismatch" before the target select.
    pub async fn apply(&mut self, action: &BulkAction) -> FormResult<()> {
        let BulkState::ActionMenuOpen(selected) = &self.state else {
            return Err(self.illegal("apply an action"));
        };
        let hosts = selected.clone();
        let actions = self.session.actions();

        let mut conflicts = Vec::new();
        for host in &hosts {
            let current = actions.read_value(action.column_key(), Some(host)).await?;
            if current.as_deref().is_some_and(|c| c != action.target()) {
                conflicts.push(host.clone());
            }
        }

        actions.click(action.menu_key(), None).await?;
        let _ = actions.settle().await?;

        if !conflicts.is_empty() {
            debug!(?conflicts, "association mismatch");
            self.enter(BulkState::MismatchResolution {
                hosts: hosts.clone(),
                action: action.clone(),
            });
            actions.click("host.fix_mismatch", None).await?;
        }

        actions.select(action.select_key(), None, action.target()).await?;
        actions.click("host.bulk_submit", None).await?;
        let _ = actions.settle().await?;
        self.enter(BulkState::ActionApplied {
            hosts,
            action: action.clone(),
        });
        Ok(())
    }

    /// Select `names`, open the menu and apply `action`
    pub async fn run<S: AsRef<str> + Sync>(&mut self, names: &[S], action: &BulkAction) -> FormResult<()> {
        let span = info_span!("bulk", %action, hosts = names.len());
        async {
            self.select(names).await?;
            self.open_action_menu().await?;
            self.apply(action).await?;
            info!(mismatch = self.resolved_mismatch(), "bulk action applied");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
