//! Property-based tests for session save/restore.
//!
//! Saving a session and restoring it into a fresh manager reproduces the
//! same urls in the same order, the same active index, and each slot's note.

use std::sync::Arc;

use proptest::prelude::*;
use tabkeep_storage::{Database, SharedStore};
use tabkeep_tabs::{NullEngine, SessionSnapshot, TabManager};

const HOME: &str = "https://home.example";

fn arb_urls() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("https://[a-z]{1,10}\\.example/[a-z0-9]{0,6}", 1..8)
}

fn arb_notes() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of("[a-zA-Z0-9 ]{1,20}"), 8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn session_round_trip(urls in arb_urls(), notes in arb_notes(), selected in 0..8usize) {
        let store: SharedStore = Arc::new(Database::open_in_memory().unwrap());

        let (saved_urls, saved_notes, saved_index) = {
            let mut manager = TabManager::new(store.clone(), Box::new(NullEngine), HOME);
            manager.restore_session(&SessionSnapshot::default());

            for url in &urls {
                manager.open_tab(Some(url.as_str()));
            }
            let ids: Vec<_> = manager.tabs().iter().map(|t| t.id.clone()).collect();
            for (id, note) in ids.iter().zip(&notes) {
                if let Some(note) = note {
                    manager.set_note(id, note).unwrap();
                }
            }
            let selected_id = ids[selected % ids.len()].clone();
            manager.select_tab(&selected_id).unwrap();
            manager.save_session();

            let urls: Vec<String> = manager.tabs().iter().map(|t| t.url.clone()).collect();
            let notes: Vec<String> = manager.tabs().iter().map(|t| t.note_text.clone()).collect();
            (urls, notes, manager.active_index())
        };

        let mut restored = TabManager::new(store, Box::new(NullEngine), HOME);
        let snapshot = restored.stored_session();
        restored.restore_session(&snapshot);

        let urls: Vec<String> = restored.tabs().iter().map(|t| t.url.clone()).collect();
        let notes: Vec<String> = restored.tabs().iter().map(|t| t.note_text.clone()).collect();

        prop_assert_eq!(urls, saved_urls);
        prop_assert_eq!(notes, saved_notes);
        prop_assert_eq!(restored.active_index(), saved_index);
    }
}
