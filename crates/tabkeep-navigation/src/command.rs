//! Reserved address bar keywords
//!
//! `note`, `mute` and `screenshot` must match exactly; anything starting
//! with `timer` toggles the focus timer (`timer`, `timer 25`, `timers`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Toggle the notes panel of the active tab
    ShowNotes,
    /// Toggle audio of the active tab
    ToggleMute,
    /// Save a capture of the active tab
    TakeScreenshot,
    /// Start or stop the pomodoro timer
    ToggleTimer,
}

impl Command {
    /// Parse already trimmed, lowercased input
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "note" => Some(Command::ShowNotes),
            "mute" => Some(Command::ToggleMute),
            "screenshot" => Some(Command::TakeScreenshot),
            _ if input.starts_with("timer") => Some(Command::ToggleTimer),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Command::ShowNotes => "note",
            Command::ToggleMute => "mute",
            Command::TakeScreenshot => "screenshot",
            Command::ToggleTimer => "timer",
        }
    }
}
