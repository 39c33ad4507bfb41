//! Session persistence
//!
//! Tabs and selected index live under separate keys. A missing or malformed
//! value loads as an empty session / index 0.

use tabkeep_storage::{keys, SharedStore, StoreExt};

use crate::session::{SessionSnapshot, SessionTab};
use crate::Result;

#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> SessionSnapshot {
        let tabs: Vec<SessionTab> = self.store.get(keys::SESSION_TABS, Vec::new());
        let selected_index: usize = self.store.get(keys::SESSION_INDEX, 0);

        tracing::debug!(tab_count = tabs.len(), selected_index, "Loaded session snapshot");
        SessionSnapshot::new(tabs, selected_index)
    }

    /// Overwrite the stored snapshot
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        self.store.set(keys::SESSION_TABS, &snapshot.tabs)?;
        self.store.set(keys::SESSION_INDEX, &snapshot.selected_index)?;

        tracing::debug!(
            tab_count = snapshot.len(),
            selected_index = snapshot.selected_index,
            "Saved session snapshot"
        );
        Ok(())
    }
}
