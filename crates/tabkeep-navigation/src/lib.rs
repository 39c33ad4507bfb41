//! tabkeep Navigation
//!
//! Address bar ("smart search") resolution, in order:
//!   1. reserved keyword → internal command (`note`, `mute`, `screenshot`, `timer…`)
//!   2. history match → navigate to the most recent matching entry
//!   3. bookmark match → navigate to the bookmark
//!   4. URL-looking input → navigate, adding `https://` when needed
//!   5. anything else → web search

mod bookmarks;
mod command;
mod error;
mod history;
mod resolver;

pub use bookmarks::{Bookmark, Bookmarks};
pub use command::Command;
pub use error::NavigationError;
pub use history::{HistoryEntry, HistoryLog};
pub use resolver::{Action, SmartSearchResolver, DEFAULT_SEARCH_TEMPLATE};

pub type Result<T> = std::result::Result<T, NavigationError>;
