//! Tab Manager
//!
//! Owns the live tabs in display order and is the only writer of the
//! history log, the notes map and the session snapshot. Persistence is
//! best-effort: a failed write is logged and reported as
//! [`TabEvent::PersistenceFailed`], and the in-memory change stands.

use std::fmt::Display;

use tabkeep_navigation::HistoryLog;
use tabkeep_session::{SessionSnapshot, SessionStore, SessionTab};
use tabkeep_storage::SharedStore;

use crate::engine::{EngineEvent, EngineHost};
use crate::error::TabError;
use crate::events::TabEvent;
use crate::notes::NotesStore;
use crate::tab::{TabId, TabRecord};
use crate::Result;

pub struct TabManager {
    /// Display order
    tabs: Vec<TabRecord>,
    active: Option<TabId>,
    history: HistoryLog,
    notes: NotesStore,
    sessions: SessionStore,
    engine: Box<dyn EngineHost>,
    home_url: String,
    events: Vec<TabEvent>,
    /// Suppresses snapshot writes while a session is being restored
    restoring: bool,
}

impl TabManager {
    /// Create a manager with no tabs. Call [`TabManager::restore_session`]
    /// once before handing it to the UI.
    pub fn new(
        store: SharedStore,
        engine: Box<dyn EngineHost>,
        home_url: impl Into<String>,
    ) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            history: HistoryLog::load(store.clone()),
            notes: NotesStore::load(store.clone()),
            sessions: SessionStore::new(store),
            engine,
            home_url: home_url.into(),
            events: Vec::new(),
            restoring: false,
        }
    }

    /// Open a tab at `url`, or at the home url, and make it active
    pub fn open_tab(&mut self, url: Option<&str>) -> TabRecord {
        let url = match url {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => self.home_url.clone(),
        };
        self.insert_tab(TabId::new(), url, String::new())
    }

    fn insert_tab(&mut self, id: TabId, url: String, title: String) -> TabRecord {
        let mut tab = TabRecord::new(id, url);
        tab.title = title;
        if let Some(note) = self.notes.get(&tab.id) {
            tab.note_text = note.to_string();
        }

        self.engine.create_view(&tab.id, &tab.url);
        tracing::info!(tab_id = %tab.id, url = %tab.url, "Opened tab");

        self.tabs.push(tab.clone());
        self.active = Some(tab.id.clone());
        self.events.push(TabEvent::TabListChanged);
        self.events.push(TabEvent::ActiveTabChanged { tab: tab.id.clone() });
        self.autosave();

        tab
    }

    /// Close a tab. Closing the last tab opens a fresh home tab before
    /// returning.
    pub fn close_tab(&mut self, id: &TabId) -> Result<()> {
        let index = self.index_of(id)?;
        let tab = self.tabs.remove(index);
        self.engine.destroy_view(&tab.id);
        tracing::info!(tab_id = %tab.id, "Closed tab");

        self.events.push(TabEvent::TabListChanged);

        if self.tabs.is_empty() {
            self.active = None;
            self.open_tab(None);
            return Ok(());
        }

        if self.active.as_ref() == Some(id) {
            let next = index.min(self.tabs.len() - 1);
            let next_id = self.tabs[next].id.clone();
            self.tabs[next].touch();
            self.active = Some(next_id.clone());
            self.events.push(TabEvent::ActiveTabChanged { tab: next_id });
        }

        self.autosave();
        Ok(())
    }

    pub fn active_tab(&self) -> Option<&TabRecord> {
        let id = self.active.as_ref()?;
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn active_index(&self) -> Option<usize> {
        let id = self.active.as_ref()?;
        self.tabs.iter().position(|t| &t.id == id)
    }

    pub fn select_tab(&mut self, id: &TabId) -> Result<()> {
        let index = self.index_of(id)?;
        if self.active.as_ref() == Some(id) {
            return Ok(());
        }

        self.tabs[index].touch();
        self.active = Some(id.clone());
        self.events.push(TabEvent::ActiveTabChanged { tab: id.clone() });
        self.autosave();
        Ok(())
    }

    /// Move a tab to a new display position. Notes stay with the tab id,
    /// not with the position.
    pub fn move_tab(&mut self, id: &TabId, new_index: usize) -> Result<()> {
        let index = self.index_of(id)?;
        let tab = self.tabs.remove(index);
        let insert_index = new_index.min(self.tabs.len());
        self.tabs.insert(insert_index, tab);

        tracing::debug!(tab_id = %id, from = index, to = insert_index, "Moved tab");
        self.events.push(TabEvent::TabListChanged);
        self.autosave();
        Ok(())
    }

    /// Open a new tab at the source tab's url. The copy has its own id, an
    /// empty note and is unmuted.
    pub fn duplicate_tab(&mut self, id: &TabId) -> Result<TabRecord> {
        let url = self.get_tab(id)?.url.clone();
        Ok(self.open_tab(Some(url.as_str())))
    }

    pub fn set_note(&mut self, id: &TabId, text: &str) -> Result<()> {
        let tab = self.get_tab_mut(id)?;
        tab.note_text = text.to_string();

        if let Err(e) = self.notes.set(id, text) {
            self.report_failure("notes", e);
        }

        self.events.push(TabEvent::NoteChanged { tab: id.clone() });
        Ok(())
    }

    /// Show or hide the notes panel. Returns whether it is now visible.
    pub fn toggle_notes_panel(&mut self, id: &TabId) -> Result<bool> {
        let tab = self.get_tab_mut(id)?;
        tab.notes_visible = !tab.notes_visible;
        Ok(tab.notes_visible)
    }

    /// Returns the new muted state
    pub fn toggle_mute(&mut self, id: &TabId) -> Result<bool> {
        let tab = self.get_tab_mut(id)?;
        tab.muted = !tab.muted;
        let muted = tab.muted;

        self.engine.set_muted(id, muted);
        tracing::debug!(tab_id = %id, muted, "Toggled mute");
        Ok(muted)
    }

    pub fn open_dev_tools(&mut self, id: &TabId) -> Result<()> {
        let tab = self.get_tab_mut(id)?;
        if tab.dev_tools_open {
            tracing::debug!(tab_id = %id, "Raising dev tools");
        } else {
            tab.dev_tools_open = true;
            tracing::debug!(tab_id = %id, "Opening dev tools");
        }

        self.engine.open_dev_tools(id);
        Ok(())
    }

    pub fn navigate(&mut self, id: &TabId, url: &str) -> Result<()> {
        self.index_of(id)?;
        self.engine.navigate(id, url);
        Ok(())
    }

    pub fn go_back(&mut self, id: &TabId) -> Result<()> {
        self.index_of(id)?;
        self.engine.go_back(id);
        Ok(())
    }

    pub fn go_forward(&mut self, id: &TabId) -> Result<()> {
        self.index_of(id)?;
        self.engine.go_forward(id);
        Ok(())
    }

    pub fn reload(&mut self, id: &TabId) -> Result<()> {
        self.index_of(id)?;
        self.engine.reload(id);
        Ok(())
    }

    pub fn go_home(&mut self, id: &TabId) -> Result<()> {
        let home = self.home_url.clone();
        self.navigate(id, &home)
    }

    pub fn capture(&mut self, id: &TabId) -> Option<Vec<u8>> {
        self.index_of(id).ok()?;
        self.engine.capture(id)
    }

    /// Apply one engine notification. Events for tabs that are no longer
    /// open are dropped.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let Some(index) = self.tabs.iter().position(|t| &t.id == event.tab()) else {
            tracing::debug!(tab_id = %event.tab(), "Ignoring event for unknown tab");
            return;
        };

        match event {
            EngineEvent::NavigationChanged { url, .. } => {
                let tab = &mut self.tabs[index];
                tab.navigate(url);
                let url = tab.url.clone();

                if let Err(e) = self.history.record(&url, &url) {
                    self.report_failure("history", e);
                }
                self.events.push(TabEvent::TabListChanged);
                self.autosave();
            }
            EngineEvent::TitleChanged { title, .. } => {
                let tab = &mut self.tabs[index];
                tab.title = title;
                let (url, title) = (tab.url.clone(), tab.title.clone());

                if let Err(e) = self.history.update_title(&url, &title) {
                    self.report_failure("history", e);
                }
                self.events.push(TabEvent::TabListChanged);
                self.autosave();
            }
            EngineEvent::IconChanged { .. } => {
                self.events.push(TabEvent::TabListChanged);
            }
            EngineEvent::DevToolsClosed { .. } => {
                self.tabs[index].dev_tools_open = false;
            }
        }
    }

    /// Drain and apply everything the engine has reported, in order
    pub fn process_engine_events(&mut self) -> usize {
        let events = self.engine.drain_events();
        let count = events.len();
        for event in events {
            self.handle_engine_event(event);
        }
        count
    }

    /// Capture every open tab in display order and overwrite the stored
    /// snapshot
    pub fn save_session(&mut self) -> SessionSnapshot {
        let tabs = self
            .tabs
            .iter()
            .map(|t| SessionTab::new(t.title.clone(), t.url.clone()).with_note_key(t.id.as_str()))
            .collect();
        let snapshot = SessionSnapshot::new(tabs, self.active_index().unwrap_or(0));

        if let Err(e) = self.sessions.save(&snapshot) {
            self.report_failure("session", e);
        }
        snapshot
    }

    /// The snapshot stored by the last save
    pub fn stored_session(&self) -> SessionSnapshot {
        self.sessions.load()
    }

    /// Open one tab per slot and select the saved index. An empty snapshot
    /// opens a single home tab.
    pub fn restore_session(&mut self, snapshot: &SessionSnapshot) {
        self.restoring = true;
        let base = self.tabs.len();

        match snapshot.clamped_index() {
            None => {
                self.open_tab(None);
            }
            Some(selected) => {
                for slot in &snapshot.tabs {
                    let id = slot
                        .note_key
                        .as_deref()
                        .map(TabId::from)
                        .filter(|id| !self.contains(id))
                        .unwrap_or_default();
                    let url = if slot.url.is_empty() {
                        self.home_url.clone()
                    } else {
                        slot.url.clone()
                    };
                    self.insert_tab(id, url, slot.title.clone());
                }

                let id = self.tabs[base + selected].id.clone();
                self.active = Some(id.clone());
                self.events.push(TabEvent::ActiveTabChanged { tab: id });
            }
        }

        tracing::info!(
            tab_count = self.tabs.len() - base,
            selected = ?self.active_index(),
            "Restored session"
        );

        self.restoring = false;
        self.save_session();
    }

    pub fn tabs(&self) -> &[TabRecord] {
        &self.tabs
    }

    pub fn get_tab(&self, id: &TabId) -> Result<&TabRecord> {
        self.tabs
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.tabs.iter().any(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn notes(&self) -> &NotesStore {
        &self.notes
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn set_home_url(&mut self, url: impl Into<String>) {
        self.home_url = url.into();
    }

    /// Notifications since the last call
    pub fn take_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.events)
    }

    fn index_of(&self, id: &TabId) -> Result<usize> {
        self.tabs
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))
    }

    fn get_tab_mut(&mut self, id: &TabId) -> Result<&mut TabRecord> {
        self.tabs
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TabError::NotFound(id.to_string()))
    }

    fn autosave(&mut self) {
        if !self.restoring && !self.tabs.is_empty() {
            self.save_session();
        }
    }

    fn report_failure(&mut self, what: &'static str, error: impl Display) {
        tracing::warn!(what, error = %error, "Failed to persist");
        self.events.push(TabEvent::PersistenceFailed {
            what,
            message: error.to_string(),
        });
    }
}
