//! Collaborator seams for out-of-band transport and local storage.
//!
//! The engine never performs I/O itself. The host application hands in
//! implementations of these traits, reports their success or failure
//! upward, and owns any retry policy; a failed publish or store leaves the
//! in-memory game state untouched.

use std::collections::HashMap;

use crate::selection::piece_pool::PieceSelectionData;

/// Fallible out-of-band publication of an encoded snapshot (a clipboard,
/// a share-link box). Returns whether the publish took.
pub trait SnapshotSink {
    fn publish(&mut self, encoded: &str) -> bool;
}

/// Narrow get/set contract over the host's key-value store. The engine
/// never learns what medium sits behind it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> bool;
}

const PLAYER_NAME_KEY: &str = "player_name";
const SELECTION_KEY: &str = "piece_selection";

/// Stored display name, if the host has one.
pub fn load_player_name(store: &dyn KeyValueStore) -> Option<String> {
    store.get(PLAYER_NAME_KEY).filter(|name| !name.is_empty())
}

pub fn save_player_name(store: &mut dyn KeyValueStore, name: &str) -> bool {
    store.set(PLAYER_NAME_KEY, name)
}

/// Stored selection data; unreadable entries read as absent.
pub fn load_selection(store: &dyn KeyValueStore) -> Option<PieceSelectionData> {
    let raw = store.get(SELECTION_KEY)?;
    serde_json::from_str(&raw).ok()
}

pub fn save_selection(store: &mut dyn KeyValueStore, selection: &PieceSelectionData) -> bool {
    let json = serde_json::to_string(selection).expect("selection serialization is infallible");
    store.set(SELECTION_KEY, &json)
}

/// In-memory store used by tests and headless harnesses.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_owned(), value.to_owned());
        true
    }
}

/// In-memory sink that can be told to fail, for exercising the caller's
/// error paths.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub published: Vec<String>,
    pub fail_next: bool,
}

impl SnapshotSink for MemorySink {
    fn publish(&mut self, encoded: &str) -> bool {
        if self.fail_next {
            self.fail_next = false;
            return false;
        }
        self.published.push(encoded.to_owned());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::{Color, PieceKind};

    #[test]
    fn player_name_round_trips_and_empty_reads_as_absent() {
        let mut store = MemoryStore::default();
        assert_eq!(load_player_name(&store), None);
        assert!(save_player_name(&mut store, "Ada"));
        assert_eq!(load_player_name(&store), Some("Ada".to_owned()));
        assert!(save_player_name(&mut store, ""));
        assert_eq!(load_player_name(&store), None);
    }

    #[test]
    fn selection_round_trips_and_junk_reads_as_absent() {
        let mut store = MemoryStore::default();
        let selection = PieceSelectionData::mirrored(
            [PieceKind::Rook, PieceKind::Queen, PieceKind::Pawn],
            Color::Dark,
        );
        assert!(save_selection(&mut store, &selection));
        assert_eq!(load_selection(&store), Some(selection));

        store.set(SELECTION_KEY, "not json");
        assert_eq!(load_selection(&store), None);
    }

    #[test]
    fn sink_failure_is_reported_not_retried() {
        let mut sink = MemorySink {
            fail_next: true,
            ..MemorySink::default()
        };
        assert!(!sink.publish("snapshot-1"));
        assert!(sink.published.is_empty());
        assert!(sink.publish("snapshot-2"));
        assert_eq!(sink.published, vec!["snapshot-2".to_owned()]);
    }
}
