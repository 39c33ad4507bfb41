//! History log
//!
//! Append-only record of visited pages. Consecutive visits to the same url
//! are collapsed; revisits after navigating elsewhere are kept.

use serde::{Deserialize, Serialize};

use tabkeep_storage::{keys, SharedStore, StoreExt};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub url: String,
}

impl HistoryEntry {
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

pub struct HistoryLog {
    /// Oldest first
    entries: Vec<HistoryEntry>,
    store: SharedStore,
}

impl HistoryLog {
    /// Load the persisted log. A missing or unreadable log starts empty.
    pub fn load(store: SharedStore) -> Self {
        let entries: Vec<HistoryEntry> = store.get(keys::HISTORY, Vec::new());
        tracing::debug!(entries = entries.len(), "Loaded history");
        Self { entries, store }
    }

    /// Record a visit. Returns `Ok(true)` if an entry was appended.
    ///
    /// The entry stays in memory even when persisting the log fails.
    pub fn record(&mut self, title: &str, url: &str) -> Result<bool> {
        if url.is_empty() {
            return Ok(false);
        }

        if self.entries.last().is_some_and(|last| last.url == url) {
            tracing::debug!(url = %url, "Skipping consecutive history duplicate");
            return Ok(false);
        }

        self.entries.push(HistoryEntry {
            title: title.to_string(),
            url: url.to_string(),
        });

        self.persist()?;
        Ok(true)
    }

    /// Set the title of the newest entry if it is for `url`. Titles usually
    /// arrive after the navigation that recorded the entry.
    pub fn update_title(&mut self, url: &str, title: &str) -> Result<bool> {
        match self.entries.last_mut() {
            Some(last) if last.url == url && last.title != title && !title.is_empty() => {
                last.title = title.to_string();
            }
            _ => return Ok(false),
        }

        self.persist()?;
        Ok(true)
    }

    /// Entries whose title or url contains `query`, case-insensitively,
    /// most recent first. Re-evaluated against the current log on every call.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .rev()
            .filter(move |entry| entry.matches(&needle))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        Ok(self.store.set(keys::HISTORY, &self.entries)?)
    }
}
