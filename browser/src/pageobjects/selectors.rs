//! Locators for the conference UI, built from the ids, test ids and
//! accessibility labels the application renders.

use crate::locator::Locator;

/// Selectors for the participants pane.
pub mod participants_pane {
    use super::Locator;

    /// Class carried by the pane while it is open.
    pub const PANE_CLASS: &str = "participants_pane";

    /// Id of the pane's "more" (context menu) button.
    pub const CONTEXT_MENU_ID: &str = "participants-pane-context-menu";

    /// Prefix of every participant list item id, followed by the endpoint id.
    pub const PARTICIPANT_ITEM_PREFIX: &str = "participant-item-";

    pub const INVITE_LABEL: &str = "Invite Someone";
    pub const PARTICIPANT_MORE_LABEL: &str = "More participant options";
    pub const ADD_BREAKOUT_ROOM_LABEL: &str = "Add breakout room";
    pub const LEAVE_BREAKOUT_ROOM_LABEL: &str = "Leave breakout room";
    pub const AUTO_ASSIGN_LABEL: &str = "Auto assign to breakout rooms";

    /// Every participant waiting in the lobby.
    pub const LOBBY_PARTICIPANT_ITEMS_XPATH: &str =
        "//div[@id='lobby-list']//div[starts-with(@id, 'participant-item-')]";

    pub fn pane() -> Locator {
        Locator::class_name(PANE_CLASS)
    }

    pub fn context_menu() -> Locator {
        Locator::id(CONTEXT_MENU_ID)
    }

    pub fn participant_item(endpoint_id: &str) -> Locator {
        Locator::id(&format!("{PARTICIPANT_ITEM_PREFIX}{endpoint_id}"))
    }

    pub fn lobby_participant_items() -> Locator {
        Locator::xpath(LOBBY_PARTICIPANT_ITEMS_XPATH)
    }

    /// The camera-off icon among the indicators of a participant list item.
    pub fn video_muted_indicator(endpoint_id: &str) -> Locator {
        Locator::xpath(format!(
            "//div[@id='{PARTICIPANT_ITEM_PREFIX}{endpoint_id}']//div[contains(@class, 'indicators')]//*[name()='svg' and @id='videoMuted']"
        ))
    }

    pub fn mute_audio(endpoint_id: &str) -> Locator {
        Locator::test_id(&format!("mute-audio-{endpoint_id}"))
    }

    pub fn ask_to_unmute_audio(endpoint_id: &str) -> Locator {
        Locator::test_id(&format!("unmute-audio-{endpoint_id}"))
    }

    pub fn allow_video(endpoint_id: &str) -> Locator {
        Locator::test_id(&format!("unmute-video-{endpoint_id}"))
    }

    pub fn more_options(endpoint_id: &str) -> Locator {
        Locator::test_id(&format!("participant-more-options-{endpoint_id}"))
    }

    pub fn admit(endpoint_id: &str) -> Locator {
        Locator::test_id(&format!("admit-{endpoint_id}"))
    }

    pub fn reject(endpoint_id: &str) -> Locator {
        Locator::test_id(&format!("reject-{endpoint_id}"))
    }

    /// Endpoint id encoded in a participant list item id.
    pub fn endpoint_id_from_item_id(item_id: &str) -> Option<&str> {
        item_id
            .strip_prefix(PARTICIPANT_ITEM_PREFIX)
            .filter(|endpoint_id| !endpoint_id.is_empty())
    }
}

/// Selectors for the toolbar.
pub mod toolbar {
    use super::Locator;

    pub const PARTICIPANTS_LABEL: &str = "Open participants pane";
    pub const CLOSE_PARTICIPANTS_LABEL: &str = "Close participants pane";
    pub const CHAT_BUTTON_ID: &str = "toolbar_button_chat";

    pub fn participants_button() -> Locator {
        Locator::accessibility_label(PARTICIPANTS_LABEL)
    }

    pub fn close_participants_button() -> Locator {
        Locator::accessibility_label(CLOSE_PARTICIPANTS_LABEL)
    }

    pub fn chat_button() -> Locator {
        Locator::id(CHAT_BUTTON_ID)
    }
}

/// Expressions evaluated against the application's global API.
pub mod scripts {
    pub const IS_CHAT_VISIBLE: &str = "APP.UI.isChatVisible()";
    pub const MY_ENDPOINT_ID: &str = "APP.conference.getMyUserId()";
    pub const IS_JOINED: &str = "APP.conference.isJoined()";
}

/// Keyboard shortcuts.
pub mod shortcuts {
    pub const TOGGLE_CHAT: char = 'c';
}
