//! Entity page objects.
//!
//! A page object turns CRUD-shaped calls into navigation, search and form
//! actions for one entity type. Resolution by display name through
//! [`PageObject::search`] is the only read path back into the application;
//! nothing is cached between operations.

mod environment;
mod host;

pub use environment::EnvironmentPage;
pub use host::{ComputeResource, HostCreate, HostPage, HostUpdate};

use async_trait::async_trait;
use tracing::{debug, info_span, warn, Instrument};

use crate::driver::ElementHandle;
use crate::navigator::EntityKind;
use crate::result::{FormError, FormResult};
use crate::session::Session;

/// Keys every list-view page object uses
pub const COMMON_KEYS: [&str; 3] = ["common.search", "common.search_button", "common.submit"];

/// Shared behaviour of entity page objects
///
/// Implementors name their entity and list-view locators; search,
/// resolution and deletion are provided.
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Entity type
    fn kind(&self) -> EntityKind;

    /// Session the page object works through
    fn session(&self) -> &Session;

    /// Templated key of an entity's link in the list view
    fn name_key(&self) -> &'static str;

    /// Templated key of an entity row's action dropdown
    fn dropdown_key(&self) -> &'static str;

    /// Templated key of an entity row's delete action
    fn delete_key(&self) -> &'static str;

    /// Every registry key this page object may use
    fn required_keys(&self) -> Vec<&'static str>;

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Check the registry holds every required key
    fn validate(&self) -> FormResult<()> {
        self.session().registry().require(self.required_keys())
    }

    /// Search the list view for `name`.
    ///
    /// Returns `None` when nothing matches; more than one match is an
    /// ambiguous lookup.
    async fn search(&self, name: &str) -> FormResult<Option<ElementHandle>> {
        let kind = self.kind();
        let span = info_span!("search", entity = %kind, name);
        async move {
            let actions = self.session().actions();
            self.session().navigator().go_to(kind).await?;
            actions.set_text("common.search", None, name).await?;
            actions.click("common.search_button", None).await?;
            let _ = actions.settle().await?;

            let locator = actions.locate(self.name_key(), Some(name))?;
            let mut visible: Vec<_> = self
                .session()
                .driver()
                .find(&locator)
                .await?
                .into_iter()
                .filter(|s| s.visible)
                .collect();
            match visible.len() {
                0 => {
                    debug!("no match");
                    Ok(None)
                }
                1 => Ok(visible.pop().map(|state| ElementHandle { locator, state })),
                n => {
                    warn!(matches = n, "ambiguous search");
                    Err(FormError::Lookup {
                        entity: kind.noun().to_string(),
                        name: name.to_string(),
                        matches: n,
                    })
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Search for `name` and require exactly one match
    async fn resolve(&self, name: &str) -> FormResult<ElementHandle> {
        self.search(name).await?.ok_or_else(|| {
            warn!(entity = %self.kind(), name, "entity not found");
            FormError::Lookup {
                entity: self.kind().noun().to_string(),
                name: name.to_string(),
                matches: 0,
            }
        })
    }

    /// Wait for evidence that `name` is gone after a confirmed delete
    async fn confirm_deleted(&self, name: &str) -> FormResult<()> {
        let _ = self
            .session()
            .actions()
            .await_gone(self.name_key(), Some(name))
            .await?;
        Ok(())
    }

    /// Delete `name` through its row dropdown.
    ///
    /// With `confirm` false the confirmation dialog is dismissed, which
    /// leaves the entity in place.
    async fn delete(&self, name: &str, confirm: bool) -> FormResult<()> {
        let span = info_span!("delete", page = self.page_name(), entity = %self.kind(), name, confirm);
        async move {
            let _ = self.resolve(name).await?;
            let actions = self.session().actions();
            actions.click(self.dropdown_key(), Some(name)).await?;
            self.session().driver().arm_dialog(confirm).await?;
            actions.click(self.delete_key(), Some(name)).await?;
            let _ = actions.settle().await?;
            if confirm {
                self.confirm_deleted(name).await?;
            }
            Ok(())
        }
        .instrument(span)
        .await
    }
}
