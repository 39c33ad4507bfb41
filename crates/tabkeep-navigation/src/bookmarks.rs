//! Bookmarks
//!
//! A flat, persisted list. The resolver consults it after history.

use serde::{Deserialize, Serialize};

use tabkeep_storage::{keys, SharedStore, StoreExt};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.url.to_lowercase().contains(needle)
    }
}

pub struct Bookmarks {
    items: Vec<Bookmark>,
    store: SharedStore,
}

impl Bookmarks {
    pub fn load(store: SharedStore) -> Self {
        let items: Vec<Bookmark> = store.get(keys::BOOKMARKS, Vec::new());
        Self { items, store }
    }

    /// Add a bookmark. A url that is already bookmarked only gets its title
    /// updated. Returns `Ok(true)` if a new bookmark was added.
    pub fn add(&mut self, title: &str, url: &str) -> Result<bool> {
        let title = if title.trim().is_empty() { url } else { title.trim() };

        let added = match self.items.iter_mut().find(|b| b.url == url) {
            Some(existing) => {
                existing.title = title.to_string();
                false
            }
            None => {
                self.items.push(Bookmark::new(title, url));
                true
            }
        };

        tracing::info!(url = %url, added, "Bookmark saved");
        self.persist()?;
        Ok(added)
    }

    pub fn remove(&mut self, url: &str) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|b| b.url != url);
        if self.items.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.items.iter().any(|b| b.url == url)
    }

    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    fn persist(&self) -> Result<()> {
        Ok(self.store.set(keys::BOOKMARKS, &self.items)?)
    }
}
