//! End-to-end runs of the page objects against a live room.

use eyre::{
    bail,
    Result,
};
use meet_ui_browser::{
    pageobjects::ActionMode,
    BrowserParticipant,
};
use meet_ui_config::{
    Config,
    ParticipantConfig,
};

/// Name of the room the breakout scenario creates first.
const FIRST_BREAKOUT_ROOM: &str = "Breakout room #1";

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Scenario {
    /// Open the participants pane and close it again.
    ParticipantsPane,
    /// Toggle the chat with the toolbar button, then with the keyboard shortcut.
    ChatPanel,
    /// A moderator mutes a guest and asks them to unmute audio and video.
    Moderation,
    /// A moderator creates a breakout room and moves a guest into it.
    BreakoutRooms,
    /// Admit a participant waiting in the lobby.
    AdmitLobby {
        /// Display name, or part of it, of the waiting participant.
        #[arg(long)]
        name: String,
    },
    /// Reject a participant waiting in the lobby.
    RejectLobby {
        #[arg(long)]
        name: String,
    },
}

impl Scenario {
    /// Display names of the browsers to start, in join order. `None` picks a
    /// random name.
    fn roles(&self) -> &'static [Option<&'static str>] {
        match self {
            Scenario::Moderation | Scenario::BreakoutRooms => &[Some("moderator"), None],
            _ => &[Some("moderator")],
        }
    }

    async fn drive(&self, participants: &[BrowserParticipant]) -> Result<()> {
        match (self, participants) {
            (Scenario::ParticipantsPane, [moderator]) => {
                let pane = moderator.participants_pane();
                pane.open().await?;
                if !pane.is_open().await? {
                    bail!("participants pane reported closed right after opening");
                }
                pane.close().await
            }
            (Scenario::ChatPanel, [participant]) => {
                let chat = participant.chat_panel();
                let initially_open = chat.is_open().await?;

                chat.click_toolbar_button().await?;
                chat.wait_for_state(!initially_open).await?;
                chat.press_shortcut().await?;
                chat.wait_for_state(initially_open).await
            }
            (Scenario::Moderation, [moderator, guest]) => {
                let target = guest.as_remote().await?;
                let pane = moderator.participants_pane();

                pane.open().await?;
                pane.mute_participant(&target).await?;
                pane.ask_to_unmute(&target, ActionMode::QuickAction).await?;
                pane.allow_video(&target, ActionMode::ContextMenu).await?;
                pane.assert_participant_video_muted(&target, false).await?;
                pane.close().await
            }
            (Scenario::BreakoutRooms, [moderator, guest]) => {
                let target = guest.as_remote().await?;
                let pane = moderator.participants_pane();

                pane.open().await?;
                pane.add_breakout_room().await?;
                pane.send_participant_to_breakout_room(&target, FIRST_BREAKOUT_ROOM)
                    .await?;

                let guest_pane = guest.participants_pane();
                guest_pane.open().await?;
                guest_pane.leave_breakout_room().await?;

                pane.auto_assign_to_breakout_rooms().await
            }
            (Scenario::AdmitLobby { name }, [moderator]) => {
                let pane = moderator.participants_pane();
                pane.open().await?;
                pane.admit_lobby_participant(name).await
            }
            (Scenario::RejectLobby { name }, [moderator]) => {
                let pane = moderator.participants_pane();
                pane.open().await?;
                pane.reject_lobby_participant(name).await
            }
            (scenario, participants) => bail!(
                "scenario {scenario} cannot run with {} participant(s)",
                participants.len()
            ),
        }
    }
}

/// Starts the browsers the scenario needs, drives it and closes every browser
/// whatever the outcome.
#[instrument(level = "info", skip_all, fields(%scenario))]
pub async fn run(scenario: Scenario, config: &Config) -> Result<()> {
    let participants = launch(config, scenario.roles()).await?;

    let result = scenario.drive(&participants).await;
    match &result {
        Ok(()) => info!("Scenario {scenario} passed"),
        Err(err) => error!("Scenario {scenario} failed: {err}"),
    }

    close_all(participants).await;
    result
}

async fn launch(config: &Config, roles: &[Option<&str>]) -> Result<Vec<BrowserParticipant>> {
    let mut participants = Vec::with_capacity(roles.len());

    // One after the other: the first to join becomes the moderator.
    for name in roles {
        let launched = match ParticipantConfig::new(config, *name) {
            Ok(participant_config) => BrowserParticipant::launch(participant_config).await,
            Err(err) => Err(err),
        };

        match launched {
            Ok(participant) => participants.push(participant),
            Err(err) => {
                close_all(participants).await;
                return Err(err);
            }
        }
    }

    Ok(participants)
}

async fn close_all(participants: Vec<BrowserParticipant>) {
    for participant in participants {
        let name = participant.name().to_string();
        if let Err(err) = participant.close().await {
            error!(name, "Failed to close the browser: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(subcommand)]
        scenario: Scenario,
    }

    #[test]
    fn scenarios_parse_from_kebab_case() {
        let cli = Cli::try_parse_from(["meet-ui-runner", "admit-lobby", "--name", "Carol"]).unwrap();
        assert_eq!(
            cli.scenario,
            Scenario::AdmitLobby {
                name: "Carol".to_string()
            }
        );
        assert_eq!(cli.scenario.to_string(), "admit-lobby");

        let cli = Cli::try_parse_from(["meet-ui-runner", "breakout-rooms"]).unwrap();
        assert_eq!(cli.scenario, Scenario::BreakoutRooms);
    }

    #[test]
    fn lobby_scenarios_require_a_name() {
        assert!(Cli::try_parse_from(["meet-ui-runner", "reject-lobby"]).is_err());
    }

    #[test]
    fn guests_join_after_the_moderator() {
        assert_eq!(Scenario::Moderation.roles(), &[Some("moderator"), None]);
        assert_eq!(Scenario::ChatPanel.roles(), &[Some("moderator")]);
    }
}
