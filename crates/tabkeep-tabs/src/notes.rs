//! Per-tab notes, keyed by tab id
//!
//! Entries outlive their tab. A restored session reuses each slot's id, so
//! the note written in a slot shows up again in that slot.

use std::collections::HashMap;

use tabkeep_storage::{keys, SharedStore, StoreExt};

use crate::tab::TabId;
use crate::Result;

pub struct NotesStore {
    notes: HashMap<TabId, String>,
    store: SharedStore,
}

impl NotesStore {
    pub fn load(store: SharedStore) -> Self {
        let notes: HashMap<TabId, String> = store.get(keys::NOTES, HashMap::new());
        tracing::debug!(notes = notes.len(), "Loaded notes");
        Self { notes, store }
    }

    pub fn get(&self, id: &TabId) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    /// Update the note and persist the whole map. The in-memory value is
    /// kept if the write fails.
    pub fn set(&mut self, id: &TabId, text: &str) -> Result<()> {
        self.notes.insert(id.clone(), text.to_string());
        self.store.set(keys::NOTES, &self.notes)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabkeep_storage::MemoryStore;

    #[test]
    fn test_set_and_reload() {
        let store = MemoryStore::shared();
        let id = TabId::new();

        let mut notes = NotesStore::load(store.clone());
        assert!(notes.get(&id).is_none());
        notes.set(&id, "buy milk").unwrap();

        let reloaded = NotesStore::load(store);
        assert_eq!(reloaded.get(&id), Some("buy milk"));
        assert_eq!(reloaded.len(), 1);
    }
}
