//! Console stand-ins for the dialogs and notifications of a desktop UI

use std::path::{Path, PathBuf};

use tabkeep_core::{Browser, UiPrompts};

/// Non-interactive prompts: the duration comes from the `timer` command
/// line, and save dialogs accept the suggested path.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    pub focus_minutes: Option<u32>,
}

impl UiPrompts for ConsoleUi {
    fn ask_focus_minutes(&mut self, default: u32, min: u32, max: u32) -> Option<u32> {
        let minutes = self.focus_minutes.take().unwrap_or(default);
        println!("focus: {minutes} minutes (allowed {min}-{max})");
        Some(minutes)
    }

    fn choose_save_path(&mut self, suggested: &Path) -> Option<PathBuf> {
        if let Some(parent) = suggested.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "Cannot create directory");
                return None;
            }
        }
        Some(suggested.to_path_buf())
    }

    fn notify(&mut self, title: &str, message: &str) {
        println!("[{title}] {message}");
    }
}

/// One JSON object per line for every pending event
pub fn print_events(browser: &mut Browser) {
    for event in browser.take_events() {
        match serde_json::to_string(&event) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "Cannot serialize event"),
        }
    }
}
