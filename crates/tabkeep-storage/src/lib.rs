//! tabkeep Storage Layer
//!
//! Key/value persistence for all browser state. Values are JSON documents
//! stored in a single SQLite `settings` table; callers go through the
//! [`PersistentStore`] trait so tests can swap in [`MemoryStore`].

mod database;
mod error;
pub mod keys;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use store::{MemoryStore, PersistentStore, SharedStore, StoreExt};

pub type Result<T> = std::result::Result<T, StorageError>;
