//! Session snapshot data structure

use serde::{Deserialize, Serialize};

/// One slot of a saved session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTab {
    pub title: String,
    pub url: String,
    /// Id of the tab that occupied this slot when the snapshot was taken.
    /// The restored tab reuses it, which brings the slot's note back.
    #[serde(default)]
    pub note_key: Option<String>,
}

impl SessionTab {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            note_key: None,
        }
    }

    pub fn with_note_key(mut self, key: impl Into<String>) -> Self {
        self.note_key = Some(key.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Tabs in display order
    pub tabs: Vec<SessionTab>,
    pub selected_index: usize,
}

impl SessionSnapshot {
    pub fn new(tabs: Vec<SessionTab>, selected_index: usize) -> Self {
        Self {
            tabs,
            selected_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// The selected index clamped into range, or `None` for an empty snapshot
    pub fn clamped_index(&self) -> Option<usize> {
        if self.tabs.is_empty() {
            None
        } else {
            Some(self.selected_index.min(self.tabs.len() - 1))
        }
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.url.as_str())
    }
}
