//! Page objects: semantic operations over one surface of the conference UI
//! each, executed through the acting participant's browser.

mod chat_panel;
mod participants_pane;
pub mod selectors;
mod toolbar;

pub use chat_panel::ChatPanel;
pub use participants_pane::{
    ActionMode,
    ParticipantsPane,
};
pub use toolbar::Toolbar;
