//! Integration tests for the history store.
//!
//! Every test works against its own temp directory, so suites can run in
//! parallel without sharing a history file.

use clipstack_history::{ClipEntry, HistoryStore, HISTORY_CAP};
use tempfile::TempDir;

fn test_store(dir: &TempDir) -> HistoryStore {
    HistoryStore::open(dir.path().join("history.json")).expect("Failed to open store")
}

fn contents(store: &HistoryStore) -> Vec<String> {
    store.load().into_iter().map(|e| e.content).collect()
}

// =============================================================================
// Loading
// =============================================================================

mod loading {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);
        std::fs::write(store.path(), "").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);
        std::fs::write(store.path(), "{ not json ]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        {
            let store = HistoryStore::open(&path).unwrap();
            store.append("kept across restarts");
        }

        {
            let store = HistoryStore::open(&path).unwrap();
            assert_eq!(contents(&store), vec!["kept across restarts"]);
        }
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("history.json");

        let store = HistoryStore::open(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());

        store.append("x");
        assert_eq!(store.load().len(), 1);
    }
}

// =============================================================================
// Appending
// =============================================================================

mod appending {
    use super::*;

    #[test]
    fn test_append_round_trips_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("hello");
        let entries = store.load();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.content, "hello");
        assert!(entry.timestamp > 0);
        assert!(!entry.id.is_empty());

        // A second load must reconstruct the exact same entry.
        assert_eq!(store.load(), entries);
    }

    #[test]
    fn test_appends_are_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("first");
        store.append("second");
        store.append("third");

        assert_eq!(contents(&store), vec!["third", "second", "first"]);
    }

    #[test]
    fn test_empty_content_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("");
        assert!(store.load().is_empty());

        store.append("real");
        store.append("");
        assert_eq!(contents(&store), vec!["real"]);
    }

    #[test]
    fn test_ids_are_unique_across_rapid_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        for i in 0..10 {
            store.append(&format!("entry {i}"));
        }

        let mut ids: Vec<String> = store.load().into_iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_unicode_content_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let text = "Hello 世界 🌍 مرحبا";
        store.append(text);
        assert_eq!(contents(&store), vec![text]);
    }

    #[test]
    fn test_multiline_content_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        let text = "line one\nline two\n\tindented";
        store.append(text);
        assert_eq!(contents(&store), vec![text]);
    }
}

// =============================================================================
// Deduplication
// =============================================================================

mod deduplication {
    use super::*;

    #[test]
    fn test_same_content_twice_keeps_one_entry_at_head() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("dup");
        let first = store.load().remove(0);

        store.append("other");
        store.append("dup");

        let entries = store.load();
        assert_eq!(
            entries.iter().map(|e| e.content.as_str()).collect::<Vec<_>>(),
            vec!["dup", "other"]
        );

        // The surviving entry is the new capture, not the old one.
        assert_ne!(entries[0].id, first.id);
        assert!(entries[0].timestamp >= first.timestamp);
    }

    #[test]
    fn test_dedup_removes_every_prior_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        // A file written by hand may carry duplicates the store itself
        // would never produce; append must still collapse all of them.
        let seeded = serde_json::to_vec_pretty(&[
            ClipEntry {
                content: "x".into(),
                timestamp: 100,
                id: "100-0".into(),
            },
            ClipEntry {
                content: "y".into(),
                timestamp: 90,
                id: "90-0".into(),
            },
            ClipEntry {
                content: "x".into(),
                timestamp: 80,
                id: "80-0".into(),
            },
        ])
        .unwrap();
        std::fs::write(store.path(), seeded).unwrap();

        store.append("x");
        assert_eq!(contents(&store), vec!["x", "y"]);
    }

    #[test]
    fn test_dedup_is_whitespace_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("text");
        store.append("text ");
        store.append(" text");

        assert_eq!(contents(&store), vec![" text", "text ", "text"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("Text");
        store.append("text");

        assert_eq!(contents(&store), vec!["text", "Text"]);
    }
}

// =============================================================================
// Capacity
// =============================================================================

mod capacity {
    use super::*;

    #[test]
    fn test_cap_discards_oldest_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        for i in 0..150 {
            store.append(&format!("entry {i}"));
        }

        let entries = store.load();
        assert_eq!(entries.len(), HISTORY_CAP);
        assert_eq!(entries[0].content, "entry 149");
        assert_eq!(entries[HISTORY_CAP - 1].content, "entry 50");
    }

    #[test]
    fn test_custom_cap() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir).with_cap(3);

        for i in 0..5 {
            store.append(&format!("entry {i}"));
        }

        assert_eq!(contents(&store), vec!["entry 4", "entry 3", "entry 2"]);
    }
}

// =============================================================================
// Clearing
// =============================================================================

mod clearing {
    use super::*;

    #[test]
    fn test_clear_empties_the_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("a");
        store.append("b");
        assert_eq!(store.load().len(), 2);

        store.clear();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_on_empty_store_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.clear();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_persists_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("a");
        store.clear();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }
}

// =============================================================================
// Persisted format
// =============================================================================

mod format {
    use super::*;

    #[test]
    fn test_file_is_a_readable_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("hello");
        let raw = std::fs::read_to_string(store.path()).unwrap();

        // Pretty-printed, one field per line.
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("\"content\": \"hello\""));
        assert!(raw.contains("\"timestamp\""));
        assert!(raw.contains("\"id\""));
    }

    #[test]
    fn test_field_names_match_the_on_disk_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(&dir);

        store.append("x");
        let raw = std::fs::read_to_string(store.path()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = parsed.as_array().unwrap()[0].as_object().unwrap();
        assert_eq!(entry.len(), 3);

        // content, then timestamp, then id.
        let content_pos = raw.find("\"content\"").unwrap();
        let timestamp_pos = raw.find("\"timestamp\"").unwrap();
        let id_pos = raw.find("\"id\"").unwrap();
        assert!(content_pos < timestamp_pos && timestamp_pos < id_pos);
    }
}
