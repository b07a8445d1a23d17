use super::selectors::{
    scripts,
    shortcuts,
};
use crate::{
    driver::Driver,
    participant::MeetParticipant,
};
use eyre::Result;
use serde_json::Value;
use std::time::Duration;

/// The chat side panel of one participant.
///
/// Visibility is read from the application itself rather than from the DOM,
/// since the panel stays mounted while it is closed.
#[derive(Debug)]
pub struct ChatPanel<'a, D> {
    participant: &'a MeetParticipant<D>,
}

impl<'a, D: Driver> ChatPanel<'a, D> {
    pub(crate) fn new(participant: &'a MeetParticipant<D>) -> Self {
        Self { participant }
    }

    /// Whether the application reports the chat as visible right now.
    pub async fn is_open(&self) -> Result<bool> {
        let value = self.participant.execute_script(scripts::IS_CHAT_VISIBLE).await?;
        Ok(is_truthy(&value))
    }

    pub async fn click_toolbar_button(&self) -> Result<()> {
        self.participant.toolbar().click_chat_button().await
    }

    /// Toggles the chat with its keyboard shortcut.
    pub async fn press_shortcut(&self) -> Result<()> {
        self.participant.press_shortcut(shortcuts::TOGGLE_CHAT).await
    }

    /// Waits for the chat to reach the given state within `timeout`.
    pub async fn wait_for_opened_or_closed(&self, timeout: Duration, open: bool) -> Result<()> {
        let outcome = self
            .participant
            .waiter()
            .until(timeout, || async move { Ok(self.is_open().await? == open) })
            .await?;

        if !outcome.is_satisfied() {
            let (expected, actual) = if open { ("open", "closed") } else { ("closed", "open") };
            return Err(self.participant.timeout_error(
                format!("the chat to be {expected} (it is still {actual})"),
                scripts::IS_CHAT_VISIBLE,
                timeout,
            ));
        }

        debug!(name = self.participant.name(), "Chat is {}", if open { "open" } else { "closed" });
        Ok(())
    }

    /// Same as [`Self::wait_for_opened_or_closed`] with the configured chat timeout.
    pub async fn wait_for_state(&self, open: bool) -> Result<()> {
        self.wait_for_opened_or_closed(self.participant.timeouts().chat(), open)
            .await
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(visible) => *visible,
        Value::String(visible) => visible == "true",
        _ => false,
    }
}
