//! Window and appearance preferences, restored at startup and written at
//! shutdown

use serde::{Deserialize, Serialize};

use tabkeep_storage::{keys, PersistentStore, StoreExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1400,
            height: 900,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Name of the stylesheet the UI applies
    pub fn stylesheet(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub geometry: WindowGeometry,
    pub fullscreen: bool,
    pub dark_mode: bool,
}

impl Preferences {
    pub fn load(store: &dyn PersistentStore) -> Self {
        Self {
            geometry: store.get(keys::WINDOW_GEOMETRY, WindowGeometry::default()),
            fullscreen: store.get(keys::WINDOW_FULLSCREEN, false),
            dark_mode: store.get(keys::DARK_MODE, false),
        }
    }

    pub fn save(&self, store: &dyn PersistentStore) -> tabkeep_storage::Result<()> {
        store.set(keys::WINDOW_GEOMETRY, &self.geometry)?;
        store.set(keys::WINDOW_FULLSCREEN, &self.fullscreen)?;
        store.set(keys::DARK_MODE, &self.dark_mode)?;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }
}
