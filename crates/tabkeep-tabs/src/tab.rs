//! Tab data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, process-unique tab identity. Also the notes key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: TabId,
    /// Current URL
    pub url: String,
    /// Page title, empty until the engine reports one
    pub title: String,
    pub note_text: String,
    pub muted: bool,
    pub dev_tools_open: bool,
    pub notes_visible: bool,
    pub created_at: DateTime<Utc>,
    /// Last time the tab was selected
    pub last_accessed_at: DateTime<Utc>,
}

impl TabRecord {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id,
            url: url.into(),
            title: String::new(),
            note_text: String::new(),
            muted: false,
            dev_tools_open: false,
            notes_visible: false,
            created_at: now,
            last_accessed_at: now,
        }
    }

    /// Update URL (navigation). The title is reset until the page reports one.
    pub fn navigate(&mut self, url: String) {
        self.url = url;
        self.title.clear();
    }

    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}
