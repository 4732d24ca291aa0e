//! Puppet environment page object.

use async_trait::async_trait;
use tracing::{info, info_span, Instrument};

use super::{PageObject, COMMON_KEYS};
use crate::navigator::EntityKind;
use crate::result::FormResult;
use crate::session::Session;
use crate::wait::Condition;

const ENVIRONMENT_KEYS: [&str; 6] = [
    "env.new",
    "env.name",
    "env.select_name",
    "env.dropdown",
    "env.delete",
    "common.notif_success",
];

/// Puppet environment page object
#[derive(Debug)]
pub struct EnvironmentPage<'a> {
    session: &'a Session,
}

impl<'a> EnvironmentPage<'a> {
    /// Bind to a session, failing if any environment key is missing
    pub fn new(session: &'a Session) -> FormResult<Self> {
        let page = Self { session };
        page.validate()?;
        Ok(page)
    }

    /// Create an environment
    pub async fn create(&self, name: &str) -> FormResult<()> {
        async {
            let actions = self.session.actions();
            self.session.navigator().go_to(EntityKind::Environments).await?;
            actions.click("env.new", None).await?;
            let _ = actions.settle().await?;
            actions.set_text("env.name", None, name).await?;
            actions.click("common.submit", None).await?;
            let _ = actions.settle().await?;
            info!("environment created");
            Ok(())
        }
        .instrument(info_span!("environment.create", name))
        .await
    }
}

#[async_trait]
impl PageObject for EnvironmentPage<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::Environments
    }

    fn session(&self) -> &Session {
        self.session
    }

    fn name_key(&self) -> &'static str {
        "env.select_name"
    }

    fn dropdown_key(&self) -> &'static str {
        "env.dropdown"
    }

    fn delete_key(&self) -> &'static str {
        "env.delete"
    }

    fn required_keys(&self) -> Vec<&'static str> {
        let mut keys = COMMON_KEYS.to_vec();
        keys.extend(ENVIRONMENT_KEYS);
        keys
    }

    /// The row must leave the list and the success notification must show.
    ///
    /// A notification left over from an earlier create is still on the
    /// page, so the notification alone does not prove the delete.
    async fn confirm_deleted(&self, name: &str) -> FormResult<()> {
        let actions = self.session.actions();
        let _ = actions.await_gone(self.name_key(), Some(name)).await?;
        let locator = actions.locate("common.notif_success", None)?;
        let _ = actions
            .waiter()
            .await_element(self.session.driver(), &locator, Condition::Visible, None)
            .await?;
        Ok(())
    }
}
