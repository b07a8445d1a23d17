use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;

/// Bounded waits used by the page objects, in milliseconds.
///
/// Every value can be overridden under `timeouts:` in `config.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    /// How often a pending condition is re-evaluated.
    #[serde(default = "defaults::poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Per-participant controls: mute/unmute buttons, lobby admit/reject, context menu entries.
    #[serde(default = "defaults::control_ms")]
    pub control_ms: u64,
    /// Participants pane showing up or going away.
    #[serde(default = "defaults::pane_ms")]
    pub pane_ms: u64,
    /// Participant list items, indicators and breakout room buttons.
    #[serde(default = "defaults::element_ms")]
    pub element_ms: u64,
    /// Chat panel opening or closing.
    #[serde(default = "defaults::chat_ms")]
    pub chat_ms: u64,
    /// Joining the conference after the page loaded.
    #[serde(default = "defaults::join_ms")]
    pub join_ms: u64,
}

mod defaults {
    pub(super) fn poll_interval_ms() -> u64 {
        500
    }
    pub(super) fn control_ms() -> u64 {
        2_000
    }
    pub(super) fn pane_ms() -> u64 {
        3_000
    }
    pub(super) fn element_ms() -> u64 {
        5_000
    }
    pub(super) fn chat_ms() -> u64 {
        2_000
    }
    pub(super) fn join_ms() -> u64 {
        30_000
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            poll_interval_ms: defaults::poll_interval_ms(),
            control_ms: defaults::control_ms(),
            pane_ms: defaults::pane_ms(),
            element_ms: defaults::element_ms(),
            chat_ms: defaults::chat_ms(),
            join_ms: defaults::join_ms(),
        }
    }
}

impl Timeouts {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn control(&self) -> Duration {
        Duration::from_millis(self.control_ms)
    }

    pub fn pane(&self) -> Duration {
        Duration::from_millis(self.pane_ms)
    }

    pub fn element(&self) -> Duration {
        Duration::from_millis(self.element_ms)
    }

    pub fn chat(&self) -> Duration {
        Duration::from_millis(self.chat_ms)
    }

    pub fn join(&self) -> Duration {
        Duration::from_millis(self.join_ms)
    }

    /// Every wait must be bounded by a strictly positive duration.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("poll_interval_ms", self.poll_interval_ms),
            ("control_ms", self.control_ms),
            ("pane_ms", self.pane_ms),
            ("element_ms", self.element_ms),
            ("chat_ms", self.chat_ms),
            ("join_ms", self.join_ms),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(format!("timeouts.{name} must be greater than zero")),
            None => Ok(()),
        }
    }
}
