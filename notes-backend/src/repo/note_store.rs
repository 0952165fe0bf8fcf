//! NoteStore — in-memory note repository
//!
//! Owns the note map and the id sequence behind a single RwLock. Ids start
//! at 1, increment per create, and are never reused — a deleted id stays
//! retired for the lifetime of the store. Every read hands out a clone, so
//! callers can never mutate stored state through a returned note.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::{NewNote, Note, NoteUpdate};

/// Errors the store can signal. Everything else (bad input, malformed ids)
/// is the controllers' problem and never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("note not found")]
    NotFound,
}

struct StoreState {
    notes: HashMap<i64, Note>,
    next_id: i64,
}

/// Thread-safe in-memory note storage for the process lifetime.
///
/// Writers (create/update/delete) hold the lock exclusively; readers share
/// it. No store operation does I/O or blocks while holding the lock.
pub struct NoteStore {
    state: RwLock<StoreState>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                notes: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store a new note, assigning the next id and `created_at`.
    /// Returns the assigned id.
    pub fn create(&self, new_note: NewNote) -> i64 {
        let mut state = self.state.write();

        let id = state.next_id;
        state.next_id += 1;

        state.notes.insert(
            id,
            Note {
                id,
                title: new_note.title,
                content: new_note.content,
                created_at: Utc::now(),
                updated_at: None,
            },
        );

        id
    }

    /// Get a copy of the note with the given id.
    pub fn get_by_id(&self, id: i64) -> Result<Note, StoreError> {
        let state = self.state.read();
        state.notes.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    /// Get a copy of every stored note. Order is unspecified.
    pub fn get_all(&self) -> Vec<Note> {
        let state = self.state.read();
        state.notes.values().cloned().collect()
    }

    /// Apply a partial update to the note with the given id.
    ///
    /// `title` is only applied when provided non-empty; `content` is applied
    /// whenever provided (empty string is a valid overwrite). `updated_at`
    /// is bumped on every accepted call, even when no field actually changed.
    pub fn update_partial(&self, id: i64, update: NoteUpdate) -> Result<(), StoreError> {
        let mut state = self.state.write();

        let note = state.notes.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(title) = update.title {
            if !title.is_empty() {
                note.title = title;
            }
        }

        if let Some(content) = update.content {
            note.content = content;
        }

        note.updated_at = Some(Utc::now());

        Ok(())
    }

    /// Remove the note with the given id. The id is not reclaimed.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut state = self.state.write();

        if state.notes.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str, content: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = NoteStore::new();

        assert_eq!(store.create(new_note("A", "x")), 1);
        assert_eq!(store.create(new_note("B", "y")), 2);
        assert_eq!(store.create(new_note("C", "z")), 3);
    }

    #[test]
    fn test_get_by_id_returns_fresh_note() {
        let store = NoteStore::new();

        let id = store.create(new_note("Groceries", "milk, eggs"));
        let note = store.get_by_id(id).expect("note should exist");

        assert_eq!(note.id, id);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert!(note.updated_at.is_none());
    }

    #[test]
    fn test_get_by_id_missing() {
        let store = NoteStore::new();

        assert_eq!(store.get_by_id(42), Err(StoreError::NotFound));
    }

    #[test]
    fn test_returned_note_is_a_copy() {
        let store = NoteStore::new();

        let id = store.create(new_note("Original", "content"));
        let mut note = store.get_by_id(id).unwrap();
        note.title = "Mutated".to_string();

        assert_eq!(store.get_by_id(id).unwrap().title, "Original");
    }

    #[test]
    fn test_delete_then_get() {
        let store = NoteStore::new();

        let id = store.create(new_note("Doomed", ""));
        store.delete(id).expect("delete should succeed");

        assert_eq!(store.get_by_id(id), Err(StoreError::NotFound));
        assert_eq!(store.delete(id), Err(StoreError::NotFound));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let store = NoteStore::new();

        assert_eq!(store.create(new_note("A", "x")), 1);
        assert_eq!(store.create(new_note("B", "y")), 2);
        store.delete(1).unwrap();
        assert_eq!(store.create(new_note("C", "z")), 3);

        let mut ids: Vec<i64> = store.get_all().iter().map(|n| n.id).collect();
        ids.sort();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_update_content_only_keeps_title() {
        let store = NoteStore::new();

        let id = store.create(new_note("Keep me", "old"));
        store
            .update_partial(
                id,
                NoteUpdate {
                    title: None,
                    content: Some("new".to_string()),
                },
            )
            .unwrap();

        let note = store.get_by_id(id).unwrap();
        assert_eq!(note.title, "Keep me");
        assert_eq!(note.content, "new");
        assert!(note.updated_at.is_some());
    }

    #[test]
    fn test_update_empty_content_overwrites() {
        let store = NoteStore::new();

        let id = store.create(new_note("Title", "something"));
        store
            .update_partial(
                id,
                NoteUpdate {
                    title: None,
                    content: Some(String::new()),
                },
            )
            .unwrap();

        assert_eq!(store.get_by_id(id).unwrap().content, "");
    }

    #[test]
    fn test_update_empty_title_ignored_but_timestamp_advances() {
        let store = NoteStore::new();

        let id = store.create(new_note("Keep me", "content"));
        store
            .update_partial(
                id,
                NoteUpdate {
                    title: Some(String::new()),
                    content: None,
                },
            )
            .unwrap();

        let note = store.get_by_id(id).unwrap();
        assert_eq!(note.title, "Keep me");
        // updated_at advances even though no field changed
        assert!(note.updated_at.is_some());
    }

    #[test]
    fn test_update_does_not_touch_created_at() {
        let store = NoteStore::new();

        let id = store.create(new_note("Title", "v1"));
        let created_at = store.get_by_id(id).unwrap().created_at;

        store
            .update_partial(
                id,
                NoteUpdate {
                    title: Some("Title v2".to_string()),
                    content: Some("v2".to_string()),
                },
            )
            .unwrap();

        let note = store.get_by_id(id).unwrap();
        assert_eq!(note.created_at, created_at);
        assert_eq!(note.title, "Title v2");
        assert_eq!(note.content, "v2");
    }

    #[test]
    fn test_update_missing_note() {
        let store = NoteStore::new();

        let result = store.update_partial(
            99,
            NoteUpdate {
                title: Some("whatever".to_string()),
                content: None,
            },
        );
        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[test]
    fn test_get_all_empty_store() {
        let store = NoteStore::new();

        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_concurrent_creates_assign_unique_ids() {
        use std::sync::Arc;

        let store = Arc::new(NoteStore::new());
        let mut handles = Vec::new();

        for t in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                (0..50)
                    .map(|i| store.create(NewNote {
                        title: format!("note {}-{}", t, i),
                        content: String::new(),
                    }))
                    .collect::<Vec<i64>>()
            }));
        }

        let mut all_ids = Vec::new();
        for handle in handles {
            let ids = handle.join().unwrap();
            // Ids handed to a single thread are strictly increasing
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            all_ids.extend(ids);
        }

        all_ids.sort();
        all_ids.dedup();
        assert_eq!(all_ids.len(), 400);
    }
}
