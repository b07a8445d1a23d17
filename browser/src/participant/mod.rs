use crate::{
    driver::Driver,
    pageobjects::{
        selectors::scripts,
        ChatPanel,
        ParticipantsPane,
        Toolbar,
    },
    wait::{
        TimeoutError,
        Waiter,
    },
};
use eyre::{
    eyre,
    Result,
};
use meet_ui_config::Timeouts;
use std::time::Duration;

mod browser;
mod elements;

pub use browser::BrowserParticipant;

/// Identifies the participant an action is aimed at, as seen from somebody
/// else's browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteParticipant {
    pub display_name: String,
    pub endpoint_id: String,
}

impl RemoteParticipant {
    pub fn new(display_name: impl Into<String>, endpoint_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            endpoint_id: endpoint_id.into(),
        }
    }
}

/// One conference participant whose browser we drive.
///
/// The page objects borrow the participant; they never hold UI state of
/// their own and re-query the page on every call.
#[derive(Debug)]
pub struct MeetParticipant<D> {
    name: String,
    driver: D,
    timeouts: Timeouts,
    waiter: Waiter,
}

impl<D: Driver> MeetParticipant<D> {
    pub fn new(name: impl Into<String>, driver: D, timeouts: Timeouts) -> Self {
        Self {
            name: name.into(),
            driver,
            waiter: Waiter::new(timeouts.poll_interval()),
            timeouts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    pub fn toolbar(&self) -> Toolbar<'_, D> {
        Toolbar::new(self)
    }

    pub fn participants_pane(&self) -> ParticipantsPane<'_, D> {
        ParticipantsPane::new(self)
    }

    pub fn chat_panel(&self) -> ChatPanel<'_, D> {
        ChatPanel::new(self)
    }

    pub async fn execute_script(&self, expression: &str) -> Result<serde_json::Value> {
        self.driver.evaluate(expression).await
    }

    pub async fn press_shortcut(&self, key: char) -> Result<()> {
        debug!(self.name, "Pressing shortcut {key:?}");
        self.driver.press_key(&key.to_string()).await
    }

    /// Endpoint id the conference assigned to this participant.
    pub async fn endpoint_id(&self) -> Result<String> {
        match self.execute_script(scripts::MY_ENDPOINT_ID).await? {
            serde_json::Value::String(id) if !id.is_empty() => Ok(id),
            other => Err(eyre!("{}: no endpoint id available, got {other}", self.name)),
        }
    }

    pub async fn as_remote(&self) -> Result<RemoteParticipant> {
        Ok(RemoteParticipant::new(self.name.clone(), self.endpoint_id().await?))
    }

    /// Waits until the conference reports this participant as joined.
    pub async fn wait_to_join(&self) -> Result<()> {
        let timeout = self.timeouts.join();
        let outcome = self
            .waiter
            .until(timeout, || async move {
                Ok(self.execute_script(scripts::IS_JOINED).await? == serde_json::Value::Bool(true))
            })
            .await?;

        if !outcome.is_satisfied() {
            return Err(self.timeout_error("the conference to be joined", scripts::IS_JOINED, timeout));
        }

        info!(self.name, "Joined the conference");
        Ok(())
    }

    pub(crate) fn timeout_error(
        &self,
        expectation: impl Into<String>,
        query: impl ToString,
        timeout: Duration,
    ) -> eyre::Report {
        let err = TimeoutError {
            actor: self.name.clone(),
            expectation: expectation.into(),
            query: query.to_string(),
            timeout,
        };
        warn!("{err}");
        err.into()
    }
}
