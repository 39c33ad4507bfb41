//! Main browser state container
//!
//! Routes UI input to the tab manager, the smart search resolver and the
//! focus timer. The UI only renders what it is told through events.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;

use tabkeep_navigation::{Action, Bookmark, Bookmarks, SmartSearchResolver};
use tabkeep_pomodoro::{PomodoroTimer, TickOutcome, ToggleOutcome};
use tabkeep_storage::{keys, Database, SharedStore, StoreExt};
use tabkeep_tabs::{EngineHost, TabEvent, TabId, TabManager};

use crate::config::Config;
use crate::downloads;
use crate::error::CoreError;
use crate::prefs::{Preferences, Theme, WindowGeometry};
use crate::ui::UiPrompts;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserEvent {
    Tab(TabEvent),
    /// Focus timer countdown, zero when it completes
    PomodoroTick { remaining: u32 },
}

/// Main browser instance
pub struct Browser {
    config: Config,
    store: SharedStore,
    tabs: TabManager,
    resolver: SmartSearchResolver,
    bookmarks: Bookmarks,
    pomodoro: PomodoroTimer,
    prefs: Preferences,
    events: Vec<BrowserEvent>,
    initialized: bool,
}

impl Browser {
    /// Open the profile database named by `config`
    pub fn new(config: Config, engine: Box<dyn EngineHost>) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Ok(Self::with_store(config, Arc::new(db), engine))
    }

    pub fn with_store(config: Config, store: SharedStore, engine: Box<dyn EngineHost>) -> Self {
        let tabs = TabManager::new(store.clone(), engine, config.homepage.clone());
        let resolver = SmartSearchResolver::with_search_engine(config.search_engine.clone());

        Self {
            bookmarks: Bookmarks::load(store.clone()),
            pomodoro: PomodoroTimer::load(store.clone()),
            prefs: Preferences::load(store.as_ref()),
            config,
            store,
            tabs,
            resolver,
            events: Vec::new(),
            initialized: false,
        }
    }

    /// Apply persisted preferences and restore the last session. Only the
    /// first call has any effect.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        let home: String = self.store.get(keys::HOME_URL, self.config.homepage.clone());
        self.tabs.set_home_url(home);

        let template: String = self
            .store
            .get(keys::SEARCH_ENGINE, self.config.search_engine.clone());
        self.resolver.set_search_engine(template);

        let snapshot = self.tabs.stored_session();
        self.tabs.restore_session(&snapshot);
        self.tabs.process_engine_events();
        self.initialized = true;

        if self.pomodoro.is_running() {
            self.events.push(BrowserEvent::PomodoroTick {
                remaining: self.pomodoro.remaining_seconds(),
            });
        }

        tracing::info!(
            tab_count = self.tabs.len(),
            theme = self.prefs.theme().stylesheet(),
            "Browser initialized"
        );
        Ok(())
    }

    // === Address bar ===

    /// Resolve address bar input and carry out the resulting action
    pub fn submit(&mut self, input: &str, ui: &mut dyn UiPrompts) -> Result<Action> {
        let active = self.active_tab_id()?;
        let action =
            self.resolver
                .resolve_with_bookmarks(input, self.tabs.history(), self.bookmarks.items());

        match &action {
            Action::Noop => {}
            Action::NavigateTo(url) => {
                self.tabs.open_tab(Some(url.as_str()));
            }
            Action::SearchQuery(query) => {
                let url = self.resolver.search_url(query);
                self.tabs.open_tab(Some(url.as_str()));
            }
            Action::ShowNotes => {
                let visible = self.tabs.toggle_notes_panel(&active)?;
                tracing::debug!(tab_id = %active, visible, "Toggled notes panel");
            }
            Action::ToggleMute => {
                self.tabs.toggle_mute(&active)?;
            }
            Action::TakeScreenshot => {
                self.take_screenshot(ui)?;
            }
            Action::ToggleTimer => {
                self.toggle_timer(ui)?;
            }
        }

        self.tabs.process_engine_events();
        Ok(action)
    }

    pub fn resolver(&self) -> &SmartSearchResolver {
        &self.resolver
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        self.store.set(keys::SEARCH_ENGINE, &template)?;
        self.resolver.set_search_engine(template);
        Ok(())
    }

    pub fn set_home_url(&mut self, url: String) -> Result<()> {
        self.store.set(keys::HOME_URL, &url)?;
        self.tabs.set_home_url(url);
        Ok(())
    }

    // === Tabs ===

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    /// Apply pending engine notifications
    pub fn pump_engine(&mut self) -> usize {
        self.tabs.process_engine_events()
    }

    fn active_tab_id(&self) -> Result<TabId> {
        self.tabs
            .active_tab()
            .map(|t| t.id.clone())
            .ok_or(CoreError::NotInitialized)
    }

    /// Save a capture of the active tab to a path the user picks
    pub fn take_screenshot(&mut self, ui: &mut dyn UiPrompts) -> Result<Option<PathBuf>> {
        let active = self.active_tab_id()?;
        let Some(image) = self.tabs.capture(&active) else {
            ui.notify("Screenshot", "Nothing to capture");
            return Ok(None);
        };

        let suggested =
            downloads::suggested_screenshot_path(&self.config.download_dir, Local::now());
        let Some(path) = ui.choose_save_path(&suggested) else {
            return Ok(None);
        };

        std::fs::write(&path, image)?;
        tracing::info!(tab_id = %active, path = %path.display(), "Saved screenshot");
        ui.notify("Screenshot", &format!("Saved to {}", path.display()));
        Ok(Some(path))
    }

    /// Ask where to save a download. The transfer itself belongs to the
    /// engine.
    pub fn handle_download(
        &mut self,
        suggested_name: &str,
        ui: &mut dyn UiPrompts,
    ) -> Option<PathBuf> {
        let suggested =
            downloads::suggested_download_path(&self.config.download_dir, suggested_name);
        let chosen = ui.choose_save_path(&suggested);

        match &chosen {
            Some(path) => tracing::info!(path = %path.display(), "Download accepted"),
            None => tracing::debug!(file_name = %suggested_name, "Download cancelled"),
        }
        chosen
    }

    // === Focus timer ===

    pub fn pomodoro(&self) -> &PomodoroTimer {
        &self.pomodoro
    }

    pub fn toggle_timer(&mut self, ui: &mut dyn UiPrompts) -> Result<ToggleOutcome> {
        let outcome = self
            .pomodoro
            .toggle(|default, min, max| ui.ask_focus_minutes(default, min, max))?;

        match outcome {
            ToggleOutcome::Started { seconds } => {
                self.events.push(BrowserEvent::PomodoroTick { remaining: seconds });
                ui.notify(
                    "Pomodoro",
                    &format!("Focus timer started for {} minutes.", seconds / 60),
                );
            }
            ToggleOutcome::Stopped => {
                self.events.push(BrowserEvent::PomodoroTick { remaining: 0 });
                ui.notify("Pomodoro", "Timer stopped.");
            }
            ToggleOutcome::Cancelled => {}
        }
        Ok(outcome)
    }

    /// One-second tick of the focus timer
    pub fn tick(&mut self, ui: &mut dyn UiPrompts) -> TickOutcome {
        let outcome = self.pomodoro.tick();

        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Running { remaining } => {
                self.events.push(BrowserEvent::PomodoroTick { remaining });
            }
            TickOutcome::Completed => {
                self.events.push(BrowserEvent::PomodoroTick { remaining: 0 });
                ui.notify("Pomodoro", "Time's up!");
            }
        }
        outcome
    }

    // === Bookmarks ===

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.bookmarks.items()
    }

    pub fn add_bookmark(&mut self, title: &str, url: &str) -> Result<bool> {
        Ok(self.bookmarks.add(title, url)?)
    }

    pub fn remove_bookmark(&mut self, url: &str) -> Result<bool> {
        Ok(self.bookmarks.remove(url)?)
    }

    // === Appearance and window ===

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Flip the dark theme and return the stylesheet to apply
    pub fn toggle_theme(&mut self) -> Theme {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        if let Err(e) = self.store.set(keys::DARK_MODE, &self.prefs.dark_mode) {
            tracing::warn!(error = %e, "Failed to persist theme");
        }
        self.prefs.theme()
    }

    pub fn set_window_geometry(&mut self, geometry: WindowGeometry) {
        self.prefs.geometry = geometry;
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.prefs.fullscreen = fullscreen;
    }

    // === Lifecycle ===

    /// Notifications since the last call
    pub fn take_events(&mut self) -> Vec<BrowserEvent> {
        let mut events: Vec<BrowserEvent> = self
            .tabs
            .take_events()
            .into_iter()
            .map(BrowserEvent::Tab)
            .collect();
        events.append(&mut self.events);
        events
    }

    /// Write everything that is only saved on exit
    pub fn shutdown(&mut self) -> Result<()> {
        self.tabs.save_session();
        self.pomodoro.save();
        self.prefs.save(self.store.as_ref())?;

        tracing::info!(tab_count = self.tabs.len(), "Browser shut down");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tabkeep_storage::MemoryStore;
    use tabkeep_tabs::{HeadlessEngine, NullEngine};

    #[derive(Default)]
    struct FakeUi {
        minutes: Option<u32>,
        save_path: Option<PathBuf>,
        asked_paths: Vec<PathBuf>,
        notifications: Vec<(String, String)>,
    }

    impl UiPrompts for FakeUi {
        fn ask_focus_minutes(&mut self, _default: u32, _min: u32, _max: u32) -> Option<u32> {
            self.minutes
        }

        fn choose_save_path(&mut self, suggested: &Path) -> Option<PathBuf> {
            self.asked_paths.push(suggested.to_path_buf());
            self.save_path.clone()
        }

        fn notify(&mut self, title: &str, message: &str) {
            self.notifications
                .push((title.to_string(), message.to_string()));
        }
    }

    fn test_config() -> Config {
        Config {
            database_path: PathBuf::from(":memory:"),
            download_dir: PathBuf::from("/tmp/downloads"),
            search_engine: "https://duckduckgo.com/?q=%s".to_string(),
            homepage: "https://home.example".to_string(),
        }
    }

    fn browser_with(store: SharedStore) -> Browser {
        let mut browser = Browser::with_store(test_config(), store, Box::new(HeadlessEngine::new()));
        browser.initialize().unwrap();
        browser
    }

    #[test]
    fn test_browser_initialization() {
        let browser = browser_with(MemoryStore::shared());

        assert_eq!(browser.tabs().len(), 1);
        assert_eq!(browser.tabs().active_tab().unwrap().url, "https://home.example");
        assert_eq!(browser.tabs().history().len(), 1);
    }

    #[test]
    fn test_submit_before_initialize() {
        let mut browser =
            Browser::with_store(test_config(), MemoryStore::shared(), Box::new(NullEngine));
        let err = browser.submit("example.com", &mut FakeUi::default()).unwrap_err();
        assert!(matches!(err, CoreError::NotInitialized));
    }

    #[test]
    fn test_submit_navigates_and_searches() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi::default();

        let action = browser.submit("example.com", &mut ui).unwrap();
        assert_eq!(action, Action::NavigateTo("https://example.com".to_string()));
        assert_eq!(browser.tabs().active_tab().unwrap().url, "https://example.com");

        browser.submit("weather today", &mut ui).unwrap();
        assert_eq!(
            browser.tabs().active_tab().unwrap().url,
            "https://duckduckgo.com/?q=weather%20today"
        );

        // Now in history, so it wins over URL detection
        let action = browser.submit("EXAMPLE", &mut ui).unwrap();
        assert_eq!(action, Action::NavigateTo("https://example.com".to_string()));
        assert_eq!(browser.tabs().len(), 4);
    }

    #[test]
    fn test_submit_commands() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi::default();

        assert_eq!(browser.submit("   ", &mut ui).unwrap(), Action::Noop);
        assert_eq!(browser.tabs().len(), 1);

        browser.submit("mute", &mut ui).unwrap();
        assert!(browser.tabs().active_tab().unwrap().muted);

        browser.submit("note", &mut ui).unwrap();
        assert!(browser.tabs().active_tab().unwrap().notes_visible);
    }

    #[test]
    fn test_timer_command_and_ticks() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi {
            minutes: Some(1),
            ..Default::default()
        };

        assert_eq!(browser.submit("timer", &mut ui).unwrap(), Action::ToggleTimer);
        assert!(browser.pomodoro().is_running());

        for _ in 0..60 {
            browser.tick(&mut ui);
        }

        assert!(!browser.pomodoro().is_running());
        assert_eq!(
            ui.notifications,
            vec![
                ("Pomodoro".to_string(), "Focus timer started for 1 minutes.".to_string()),
                ("Pomodoro".to_string(), "Time's up!".to_string()),
            ]
        );

        let ticks: Vec<u32> = browser
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                BrowserEvent::PomodoroTick { remaining } => Some(remaining),
                _ => None,
            })
            .collect();
        assert_eq!(ticks.first(), Some(&60));
        assert_eq!(ticks.last(), Some(&0));
        assert_eq!(ticks.len(), 61);
    }

    #[test]
    fn test_timer_stop_notifies_and_resets_display() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi {
            minutes: Some(5),
            ..Default::default()
        };

        browser.toggle_timer(&mut ui).unwrap();
        browser.tick(&mut ui);
        browser.take_events();

        assert_eq!(browser.toggle_timer(&mut ui).unwrap(), ToggleOutcome::Stopped);
        assert!(!browser.pomodoro().is_running());
        assert_eq!(
            browser.take_events(),
            vec![BrowserEvent::PomodoroTick { remaining: 0 }]
        );
        assert_eq!(
            ui.notifications.last(),
            Some(&("Pomodoro".to_string(), "Timer stopped.".to_string()))
        );
    }

    #[test]
    fn test_timer_prompt_dismissed() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi::default();
        browser.take_events();

        assert_eq!(browser.toggle_timer(&mut ui).unwrap(), ToggleOutcome::Cancelled);
        assert!(browser.take_events().is_empty());
        assert!(ui.notifications.is_empty());
    }

    #[test]
    fn test_screenshot_saved_to_chosen_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("shot.png");

        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi {
            save_path: Some(target.clone()),
            ..Default::default()
        };

        browser.submit("screenshot", &mut ui).unwrap();

        let saved = std::fs::read_to_string(&target).unwrap();
        assert_eq!(saved.trim(), "https://home.example");
        assert!(ui.asked_paths[0].starts_with("/tmp/downloads"));
    }

    #[test]
    fn test_screenshot_cancelled() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi::default();

        assert!(browser.take_screenshot(&mut ui).unwrap().is_none());
        assert_eq!(ui.asked_paths.len(), 1);
    }

    #[test]
    fn test_handle_download() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi {
            save_path: Some(PathBuf::from("/home/me/file.zip")),
            ..Default::default()
        };

        let chosen = browser.handle_download("../file.zip", &mut ui);
        assert_eq!(chosen, Some(PathBuf::from("/home/me/file.zip")));
        assert_eq!(ui.asked_paths, vec![PathBuf::from("/tmp/downloads/file.zip")]);
    }

    #[test]
    fn test_bookmarks_feed_resolver() {
        let mut browser = browser_with(MemoryStore::shared());
        let mut ui = FakeUi::default();
        browser.add_bookmark("Crates registry", "https://crates.io").unwrap();

        let action = browser.submit("registry", &mut ui).unwrap();
        assert_eq!(action, Action::NavigateTo("https://crates.io".to_string()));

        assert!(browser.remove_bookmark("https://crates.io").unwrap());
        assert!(browser.bookmarks().is_empty());
    }

    #[test]
    fn test_restart_restores_state() {
        let store = MemoryStore::shared();
        {
            let mut browser = browser_with(store.clone());
            let mut ui = FakeUi::default();
            browser.submit("example.com", &mut ui).unwrap();
            browser.set_home_url("https://start.example".to_string()).unwrap();
            assert_eq!(browser.toggle_theme(), Theme::Dark);
            browser.set_fullscreen(true);
            browser.shutdown().unwrap();
        }

        let browser = browser_with(store);
        let urls: Vec<&str> = browser.tabs().tabs().iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["https://home.example", "https://example.com"]);
        assert_eq!(browser.tabs().active_index(), Some(1));
        assert_eq!(browser.tabs().home_url(), "https://start.example");
        assert!(browser.preferences().fullscreen);
        assert_eq!(browser.preferences().theme(), Theme::Dark);
    }

    #[test]
    fn test_initialize_restores_once() {
        let mut browser = browser_with(MemoryStore::shared());
        browser.initialize().unwrap();
        assert_eq!(browser.tabs().len(), 1);
    }

    #[test]
    fn test_open_on_disk_profile() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("profile"));

        let mut browser = Browser::new(config, Box::new(NullEngine)).unwrap();
        browser.initialize().unwrap();
        browser.shutdown().unwrap();

        assert!(dir.path().join("profile/tabkeep.db").exists());
    }
}
