//! # The Note Index
//!
//! The ordered, deduplicated list of known documents, persisted to the
//! settings store after every mutation and reconciled against the real
//! filesystem on load.
//!
//! Ordering rules: a new id is inserted at the front (most recent first); an
//! update to an existing id replaces the record **in place** without moving
//! it. There is exactly one entry per id.
//!
//! Every entry's `location` points at a file that existed when the index was
//! last loaded or persisted. Files deleted behind our back are dropped the
//! next time the index loads, and the filtered list is written straight back,
//! so a stale stored index heals itself.
//!
//! Persistence is a full rewrite of the list on each mutation: O(index size)
//! per operation, which is fine for a personal document count. Don't turn
//! this into a log-structured store.

use crate::model::Note;
use crate::store::SettingsStore;
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, warn};
use uuid::Uuid;

/// Settings key under which the serialized index lives.
pub const INDEX_KEY: &str = "recent-notes";

pub struct NoteIndex<S: SettingsStore> {
    notes: Vec<Note>,
    store: S,
}

impl<S: SettingsStore> NoteIndex<S> {
    /// Loads the index from the settings store.
    ///
    /// Absent or malformed data yields an empty index; no error surfaces.
    /// Entries whose backing file no longer exists are dropped, and the
    /// filtered list is immediately re-persisted.
    pub fn load(store: S) -> Self {
        let notes = store
            .get(INDEX_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => Some(notes),
                Err(err) => {
                    warn!(error = %err, "stored note index is malformed, starting empty");
                    None
                }
            })
            .unwrap_or_default();

        let mut index = Self { notes, store };
        index.notes.retain(|note| {
            let present = note.location.exists();
            if !present {
                debug!(
                    id = %note.id,
                    location = %note.location.display(),
                    "dropping index entry with missing file"
                );
            }
            present
        });
        index.persist();
        index
    }

    /// All notes, most recent first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Inserts or replaces a note. An existing id is replaced in place,
    /// keeping its position; a new id goes to the front of the list.
    pub fn upsert(&mut self, note: Note) {
        match self.notes.iter_mut().find(|slot| slot.id == note.id) {
            Some(slot) => *slot = note,
            None => self.notes.insert(0, note),
        }
        self.persist();
    }

    /// Removes `id` from the index without touching the filesystem.
    /// No-op if the id is unknown.
    pub fn remove_from_index(&mut self, id: Uuid) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() != before {
            self.persist();
        }
    }

    /// Deletes the backing file and removes the entry.
    ///
    /// The filesystem delete goes first: a file that is already gone counts
    /// as deleted, and any other failure is logged without keeping the entry
    /// alive. A requested deletion never leaves the index pointing at the
    /// note.
    pub fn delete_from_device(&mut self, id: Uuid) {
        if let Some(note) = self.get(id) {
            if let Err(err) = fs::remove_file(&note.location) {
                if err.kind() != ErrorKind::NotFound {
                    warn!(
                        id = %id,
                        location = %note.location.display(),
                        error = %err,
                        "could not delete note file"
                    );
                }
            }
        }
        self.remove_from_index(id);
    }

    /// Empties the recent-notes list and persists the empty list. Backing
    /// files stay on disk; bulk deletion from disk is deliberately not
    /// offered here.
    pub fn clear_all(&mut self) {
        self.notes.clear();
        self.persist();
    }

    /// Writes the full list to the settings store. A failed write is logged
    /// and otherwise ignored: the in-memory list stays authoritative for the
    /// rest of the process. Never retried, never fatal.
    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.notes) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "could not serialize note index");
                return;
            }
        };
        if let Err(err) = self.store.set(INDEX_KEY, &serialized) {
            warn!(error = %err, "could not persist note index");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::derive_title;
    use crate::store::memory::fixtures::FailingSettings;
    use crate::store::memory::InMemorySettings;
    use chrono::Utc;
    use std::path::{Path, PathBuf};

    fn note_backed_by(dir: &Path, name: &str, content: &str) -> Note {
        let location = dir.join(name);
        fs::write(&location, content).unwrap();
        Note::new(location, content)
    }

    fn phantom_note(dir: &Path, name: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            title: derive_title(name),
            location: dir.join(name),
            saved_at: Utc::now(),
        }
    }

    fn seeded_store(notes: &[Note]) -> InMemorySettings {
        let mut store = InMemorySettings::new();
        store
            .set(INDEX_KEY, &serde_json::to_string(notes).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn load_with_no_stored_data_is_empty() {
        let index = NoteIndex::load(InMemorySettings::new());
        assert!(index.is_empty());
    }

    #[test]
    fn load_with_malformed_data_is_empty() {
        let mut store = InMemorySettings::new();
        store.set(INDEX_KEY, "certainly { not json").unwrap();
        let index = NoteIndex::load(store);
        assert!(index.is_empty());
    }

    #[test]
    fn load_drops_entries_with_missing_files_and_repersists() {
        let dir = tempfile::tempdir().unwrap();
        let alive_a = note_backed_by(dir.path(), "a.txt", "a");
        let gone = phantom_note(dir.path(), "gone.txt");
        let alive_b = note_backed_by(dir.path(), "b.txt", "b");

        let store = seeded_store(&[alive_a.clone(), gone, alive_b.clone()]);
        let index = NoteIndex::load(store);

        assert_eq!(index.len(), 2);
        assert_eq!(index.notes()[0].id, alive_a.id);
        assert_eq!(index.notes()[1].id, alive_b.id);

        // The healed list was written straight back to the store.
        let repersisted: Vec<Note> =
            serde_json::from_str(&index.store.get(INDEX_KEY).unwrap()).unwrap();
        assert_eq!(repersisted.len(), 2);
        assert!(repersisted.iter().all(|n| n.location.exists()));
    }

    #[test]
    fn roundtrip_preserves_all_fields_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let a = note_backed_by(dir.path(), "a.txt", "Alpha");
        let b = note_backed_by(dir.path(), "b.txt", "Beta");
        index.upsert(a.clone());
        index.upsert(b.clone());

        let raw = index.store.get(INDEX_KEY).unwrap();
        let reloaded: Vec<Note> = serde_json::from_str(&raw).unwrap();
        assert_eq!(reloaded, vec![b, a]);
    }

    #[test]
    fn new_notes_insert_at_the_front() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let a = note_backed_by(dir.path(), "a.txt", "A");
        let b = note_backed_by(dir.path(), "b.txt", "B");
        let c = note_backed_by(dir.path(), "c.txt", "C");
        index.upsert(a.clone());
        index.upsert(b.clone());
        index.upsert(c.clone());

        let ids: Vec<Uuid> = index.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[test]
    fn upsert_of_existing_id_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let a = note_backed_by(dir.path(), "a.txt", "A");
        let b = note_backed_by(dir.path(), "b.txt", "B");
        let c = note_backed_by(dir.path(), "c.txt", "C");
        index.upsert(a);
        index.upsert(b.clone());
        index.upsert(c);

        let updated = Note {
            title: "B, revised".to_string(),
            saved_at: Utc::now(),
            ..b.clone()
        };
        index.upsert(updated);

        assert_eq!(index.len(), 3);
        // Still in the middle, with the new title.
        assert_eq!(index.notes()[1].id, b.id);
        assert_eq!(index.notes()[1].title, "B, revised");
    }

    #[test]
    fn upsert_twice_keeps_a_single_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let note = note_backed_by(dir.path(), "n.txt", "first");
        index.upsert(note.clone());
        index.upsert(Note {
            title: "second".to_string(),
            ..note.clone()
        });

        assert_eq!(index.len(), 1);
        assert_eq!(index.notes()[0].title, "second");
    }

    #[test]
    fn remove_from_index_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let note = note_backed_by(dir.path(), "keep.txt", "keep me");
        index.upsert(note.clone());

        index.remove_from_index(note.id);

        assert!(index.is_empty());
        assert!(note.location.exists());
    }

    #[test]
    fn remove_of_unknown_id_is_a_noop() {
        let mut index = NoteIndex::load(InMemorySettings::new());
        index.remove_from_index(Uuid::new_v4());
        assert!(index.is_empty());
    }

    #[test]
    fn delete_from_device_removes_file_and_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let note = note_backed_by(dir.path(), "doomed.txt", "bye");
        index.upsert(note.clone());

        index.delete_from_device(note.id);

        assert!(!note.location.exists());
        assert!(index.get(note.id).is_none());
    }

    #[test]
    fn delete_from_device_still_removes_entry_when_file_is_already_gone() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let note = note_backed_by(dir.path(), "fleeting.txt", "x");
        index.upsert(note.clone());
        fs::remove_file(&note.location).unwrap();

        index.delete_from_device(note.id);

        assert!(index.get(note.id).is_none());
    }

    #[test]
    fn clear_all_empties_index_but_not_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(InMemorySettings::new());
        let locations: Vec<PathBuf> = (0..3)
            .map(|i| {
                let note = note_backed_by(dir.path(), &format!("n{i}.txt"), "content");
                let location = note.location.clone();
                index.upsert(note);
                location
            })
            .collect();

        index.clear_all();

        assert!(index.is_empty());
        assert!(locations.iter().all(|loc| loc.exists()));
        let repersisted: Vec<Note> =
            serde_json::from_str(&index.store.get(INDEX_KEY).unwrap()).unwrap();
        assert!(repersisted.is_empty());
    }

    #[test]
    fn persistence_failures_are_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = NoteIndex::load(FailingSettings::new());
        let note = note_backed_by(dir.path(), "n.txt", "content");

        // None of these may panic or surface an error; the in-memory list
        // remains the source of truth.
        index.upsert(note.clone());
        assert_eq!(index.len(), 1);
        index.remove_from_index(note.id);
        assert!(index.is_empty());
        index.upsert(note);
        index.clear_all();
        assert!(index.is_empty());
    }

    #[test]
    fn load_from_failing_store_still_reads_seeded_data() {
        let dir = tempfile::tempdir().unwrap();
        let note = note_backed_by(dir.path(), "n.txt", "content");
        let store = FailingSettings::seeded(
            INDEX_KEY,
            &serde_json::to_string(&vec![note.clone()]).unwrap(),
        );

        let index = NoteIndex::load(store);
        assert_eq!(index.len(), 1);
        assert_eq!(index.notes()[0].id, note.id);
    }
}
