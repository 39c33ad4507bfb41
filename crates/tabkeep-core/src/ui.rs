//! Prompts and dialogs owned by the UI layer

use std::path::{Path, PathBuf};

pub trait UiPrompts {
    /// Ask for a focus duration in minutes. `None` if dismissed.
    fn ask_focus_minutes(&mut self, default: u32, min: u32, max: u32) -> Option<u32>;

    /// File save dialog. `None` if cancelled.
    fn choose_save_path(&mut self, suggested: &Path) -> Option<PathBuf>;

    fn notify(&mut self, title: &str, message: &str);
}
