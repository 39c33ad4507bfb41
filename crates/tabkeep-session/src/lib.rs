//! tabkeep Session Snapshot
//!
//! - A snapshot is the ordered list of open tabs plus the selected index
//! - It is replaced wholesale on every save, never merged
//! - Each slot remembers the id its tab had, so notes follow the slot
//! - Restored exactly once at startup

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{SessionSnapshot, SessionTab};
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
