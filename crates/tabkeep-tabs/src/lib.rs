//! tabkeep Tab Management
//!
//! Owns the live tab collection and everything that hangs off a tab's
//! lifetime: history recording, per-tab notes, mute and dev-tools flags,
//! and the session snapshot.
//!
//! Invariants:
//! - Once a session has been restored the collection is never observably
//!   empty; closing the last tab opens a home tab in the same call
//! - Tab ids are generated once and never reused within a process

mod engine;
mod error;
mod events;
mod manager;
mod notes;
mod tab;

pub use engine::{EngineEvent, EngineHost, HeadlessEngine, NullEngine};
pub use error::TabError;
pub use events::TabEvent;
pub use manager::TabManager;
pub use notes::NotesStore;
pub use tab::{TabId, TabRecord};

pub use tabkeep_navigation::{HistoryEntry, HistoryLog};
pub use tabkeep_session::{SessionSnapshot, SessionTab};

pub type Result<T> = std::result::Result<T, TabError>;
