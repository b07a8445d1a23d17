use super::selectors::toolbar;
use crate::{
    driver::Driver,
    participant::MeetParticipant,
};
use eyre::Result;

/// The conference toolbar, only the buttons the panels are opened from.
#[derive(Debug)]
pub struct Toolbar<'a, D> {
    participant: &'a MeetParticipant<D>,
}

impl<'a, D: Driver> Toolbar<'a, D> {
    pub(crate) fn new(participant: &'a MeetParticipant<D>) -> Self {
        Self { participant }
    }

    pub async fn click_participants_button(&self) -> Result<()> {
        self.participant
            .click_on_element(
                &toolbar::participants_button(),
                self.participant.timeouts().element(),
                "participants toolbar button",
            )
            .await
    }

    pub async fn click_close_participants_button(&self) -> Result<()> {
        self.participant
            .click_on_element(
                &toolbar::close_participants_button(),
                self.participant.timeouts().element(),
                "close participants pane button",
            )
            .await
    }

    pub async fn click_chat_button(&self) -> Result<()> {
        self.participant
            .click_on_element(
                &toolbar::chat_button(),
                self.participant.timeouts().element(),
                "chat toolbar button",
            )
            .await
    }
}
