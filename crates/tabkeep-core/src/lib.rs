//! tabkeep Core
//!
//! Central coordination layer. The engine and the windowing toolkit are
//! collaborators behind traits; every piece of state lives here.

mod browser;
mod config;
mod downloads;
mod error;
mod prefs;
mod ui;

pub use browser::{Browser, BrowserEvent};
pub use config::Config;
pub use error::CoreError;
pub use prefs::{Preferences, Theme, WindowGeometry};
pub use ui::UiPrompts;

// Re-export core components
pub use tabkeep_navigation::{
    Action, Bookmark, Bookmarks, HistoryEntry, HistoryLog, NavigationError, SmartSearchResolver,
};
pub use tabkeep_pomodoro::{PomodoroError, PomodoroState, PomodoroTimer, TickOutcome, ToggleOutcome};
pub use tabkeep_session::{SessionError, SessionSnapshot, SessionTab};
pub use tabkeep_storage::{Database, MemoryStore, PersistentStore, SharedStore, StorageError};
pub use tabkeep_tabs::{
    EngineEvent, EngineHost, HeadlessEngine, NullEngine, TabError, TabEvent, TabId, TabManager,
    TabRecord,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
