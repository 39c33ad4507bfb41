//! Notifications for the UI layer

use serde::Serialize;

use crate::tab::TabId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabEvent {
    ActiveTabChanged { tab: TabId },
    /// Tabs were added, removed, moved or retitled
    TabListChanged,
    NoteChanged { tab: TabId },
    /// A best-effort write failed; in-memory state was kept
    PersistenceFailed { what: &'static str, message: String },
}
