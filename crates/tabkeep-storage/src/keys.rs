//! Well-known keys in the settings table.

pub const WINDOW_GEOMETRY: &str = "window/geometry";
pub const WINDOW_FULLSCREEN: &str = "window/fullscreen";
pub const DARK_MODE: &str = "appearance/dark_mode";
pub const HOME_URL: &str = "navigation/home_url";
pub const SEARCH_ENGINE: &str = "navigation/search_engine";
pub const SESSION_TABS: &str = "session/last_session";
pub const SESSION_INDEX: &str = "session/last_session_index";
pub const HISTORY: &str = "history/items";
pub const NOTES: &str = "notes/all";
pub const BOOKMARKS: &str = "bookmarks/items";
pub const POMODORO_STATE: &str = "pomodoro/state";
pub const POMODORO_TIME: &str = "pomodoro/time";
