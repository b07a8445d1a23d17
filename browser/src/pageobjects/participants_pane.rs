use super::selectors::participants_pane as selectors;
use crate::{
    driver::{
        Driver,
        DriverElement as _,
    },
    locator::Locator,
    participant::{
        MeetParticipant,
        RemoteParticipant,
    },
};
use eyre::{
    eyre,
    Result,
};

/// Which control a moderation action goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum ActionMode {
    /// The button revealed when hovering the participant's list item.
    #[strum(to_string = "quick action")]
    QuickAction,
    /// The entry of the participant's "more options" menu.
    #[strum(to_string = "context menu")]
    ContextMenu,
}

/// The participants pane as seen by one participant.
#[derive(Debug)]
pub struct ParticipantsPane<'a, D> {
    participant: &'a MeetParticipant<D>,
}

impl<'a, D: Driver> ParticipantsPane<'a, D> {
    pub(crate) fn new(participant: &'a MeetParticipant<D>) -> Self {
        Self { participant }
    }

    /// Clicks the toolbar participants button and waits for the pane to show up.
    pub async fn open(&self) -> Result<()> {
        self.participant.toolbar().click_participants_button().await?;
        self.wait_for_visible().await
    }

    /// Clicks the close button and waits for the pane to go away.
    pub async fn close(&self) -> Result<()> {
        self.participant.toolbar().click_close_participants_button().await?;
        self.wait_for_hidden().await
    }

    /// `true` if the pane shows up within the pane timeout.
    pub async fn is_open(&self) -> Result<bool> {
        self.participant
            .is_present_within(&selectors::pane(), self.participant.timeouts().pane())
            .await
    }

    pub async fn wait_for_visible(&self) -> Result<()> {
        self.participant
            .wait_for_display_to_be(
                &selectors::pane(),
                self.participant.timeouts().pane(),
                true,
                "participants pane",
            )
            .await
    }

    pub async fn wait_for_hidden(&self) -> Result<()> {
        self.participant
            .wait_for_display_to_be(
                &selectors::pane(),
                self.participant.timeouts().pane(),
                false,
                "participants pane",
            )
            .await
    }

    pub async fn click_invite(&self) -> Result<()> {
        self.click_labelled(selectors::INVITE_LABEL).await
    }

    /// Checks the camera-off indicator of `target`, opening the pane for the
    /// check if needed and closing it again afterwards.
    pub async fn assert_participant_video_muted(&self, target: &RemoteParticipant, muted: bool) -> Result<()> {
        let was_open = self.is_open().await?;
        if !was_open {
            info!(name = self.participant.name(), "Participants pane is not open, will open it.");
            self.open().await?;
        }

        let indicator = selectors::video_muted_indicator(&target.endpoint_id);
        let timeout = self.participant.timeouts().element();
        let waiter = self.participant.waiter();
        let outcome = if muted {
            waiter.until(timeout, || self.participant.is_present(&indicator)).await?
        } else {
            waiter
                .until(timeout, || self.participant.is_absent_or_hidden(&indicator))
                .await?
        };

        if !outcome.is_satisfied() {
            return Err(self.participant.timeout_error(
                format!(
                    "{} {} be video muted",
                    target.display_name,
                    if muted { "should" } else { "shouldn't" }
                ),
                &indicator,
                timeout,
            ));
        }

        if !was_open {
            self.close().await?;
        }
        Ok(())
    }

    /// Hovers the list item of `target` and clicks its mute button.
    pub async fn mute_participant(&self, target: &RemoteParticipant) -> Result<()> {
        self.hover_participant_item(target).await?;
        self.participant
            .click_on_element(
                &selectors::mute_audio(&target.endpoint_id),
                self.participant.timeouts().control(),
                &format!("mute control for {}", target.display_name),
            )
            .await?;
        info!(name = self.participant.name(), "Muted {}", target.display_name);
        Ok(())
    }

    /// Asks `target` to unmute their microphone.
    pub async fn ask_to_unmute(&self, target: &RemoteParticipant, mode: ActionMode) -> Result<()> {
        self.hover_participant_item(target).await?;
        self.moderate(
            target,
            mode,
            &selectors::ask_to_unmute_audio(&target.endpoint_id),
            "ask to unmute",
        )
        .await
    }

    /// Asks `target` to turn their camera back on.
    pub async fn allow_video(&self, target: &RemoteParticipant, mode: ActionMode) -> Result<()> {
        self.hover_participant_item(target).await?;
        self.moderate(
            target,
            mode,
            &selectors::allow_video(&target.endpoint_id),
            "allow video",
        )
        .await
    }

    pub async fn add_breakout_room(&self) -> Result<()> {
        self.click_labelled(selectors::ADD_BREAKOUT_ROOM_LABEL).await
    }

    pub async fn auto_assign_to_breakout_rooms(&self) -> Result<()> {
        self.click_labelled(selectors::AUTO_ASSIGN_LABEL).await
    }

    pub async fn leave_breakout_room(&self) -> Result<()> {
        self.click_labelled(selectors::LEAVE_BREAKOUT_ROOM_LABEL).await
    }

    /// Lets the lobby participant called `name` into the conference.
    pub async fn admit_lobby_participant(&self, name: &str) -> Result<()> {
        let endpoint_id = self.find_lobby_participant(name).await?;
        self.participant
            .click_on_element(
                &selectors::admit(&endpoint_id),
                self.participant.timeouts().control(),
                &format!("admit button for {name}"),
            )
            .await?;
        info!(name = self.participant.name(), "Admitted {name} from the lobby");
        Ok(())
    }

    /// Turns away the lobby participant called `name`.
    pub async fn reject_lobby_participant(&self, name: &str) -> Result<()> {
        let endpoint_id = self.find_lobby_participant(name).await?;
        self.participant
            .click_on_element(
                &selectors::reject(&endpoint_id),
                self.participant.timeouts().control(),
                &format!("reject button for {name}"),
            )
            .await?;
        info!(name = self.participant.name(), "Rejected {name} from the lobby");
        Ok(())
    }

    /// Clicks the pane's own "more" button.
    pub async fn click_context_menu_button(&self) -> Result<()> {
        self.participant
            .wait_for_element(
                &selectors::context_menu(),
                self.participant.timeouts().pane(),
                "participants pane context menu button",
            )
            .await?
            .click()
            .await
    }

    /// Moves `target` to the breakout room called `room_name` through the
    /// participant's context menu.
    pub async fn send_participant_to_breakout_room(&self, target: &RemoteParticipant, room_name: &str) -> Result<()> {
        self.open_participant_context_menu(target).await?;

        self.participant
            .wait_for_element(
                &Locator::accessibility_label(room_name),
                self.participant.timeouts().control(),
                &format!("breakout room entry {room_name:?}"),
            )
            .await?
            .click()
            .await?;

        info!(
            name = self.participant.name(),
            "Sent {} to breakout room {room_name:?}", target.display_name
        );
        Ok(())
    }
}

impl<D: Driver> ParticipantsPane<'_, D> {
    async fn click_labelled(&self, label: &str) -> Result<()> {
        let locator = Locator::accessibility_label(label);
        let timeout = self.participant.timeouts().element();
        let what = format!("{label:?} button");
        self.participant.wait_for_element(&locator, timeout, &what).await?;
        self.participant.click_on_element(&locator, timeout, &what).await
    }

    async fn hover_participant_item(&self, target: &RemoteParticipant) -> Result<D::Element> {
        let item = self
            .participant
            .wait_for_element(
                &selectors::participant_item(&target.endpoint_id),
                self.participant.timeouts().element(),
                &format!("list item of {}", target.display_name),
            )
            .await?;
        item.hover().await?;
        Ok(item)
    }

    async fn moderate(&self, target: &RemoteParticipant, mode: ActionMode, control: &Locator, action: &str) -> Result<()> {
        let timeout = self.participant.timeouts().control();

        if mode == ActionMode::ContextMenu {
            let more = self
                .participant
                .wait_for_element(
                    &selectors::more_options(&target.endpoint_id),
                    timeout,
                    &format!("more options for {}", target.display_name),
                )
                .await?;
            more.hover().await?;
            more.click().await?;
        }

        self.participant
            .click_on_element(control, timeout, &format!("{action} control for {}", target.display_name))
            .await?;

        info!(
            name = self.participant.name(),
            "Clicked {action} for {} via {mode}", target.display_name
        );
        Ok(())
    }

    async fn open_participant_context_menu(&self, target: &RemoteParticipant) -> Result<()> {
        let item = self.hover_participant_item(target).await?;
        let more_label = Locator::accessibility_label(selectors::PARTICIPANT_MORE_LABEL);
        let more = item.find_elements(&more_label).await?.into_iter().next().ok_or_else(|| {
            eyre!(
                "{}: no {more_label} inside the list item of {}",
                self.participant.name(),
                target.display_name
            )
        })?;
        more.click().await
    }

    /// Endpoint id of the lobby entry whose text contains `name`.
    async fn find_lobby_participant(&self, name: &str) -> Result<String> {
        let items = &selectors::lobby_participant_items();
        let timeout = self.participant.timeouts().control();

        let item_id = self
            .participant
            .waiter()
            .poll(timeout, || async move {
                for item in self.participant.driver().find_elements(items).await? {
                    if item.text().await?.contains(name) {
                        let id = item.attribute("id").await?.ok_or_else(|| {
                            eyre!("{}: lobby entry for {name} has no id", self.participant.name())
                        })?;
                        return Ok(Some(id));
                    }
                }
                Ok(None)
            })
            .await?
            .ok_or_else(|| self.participant.timeout_error(format!("lobby entry for {name}"), items, timeout))?;

        selectors::endpoint_id_from_item_id(&item_id)
            .map(str::to_string)
            .ok_or_else(|| eyre!("lobby entry id {item_id:?} does not carry an endpoint id"))
    }
}
