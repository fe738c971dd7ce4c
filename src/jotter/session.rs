//! # The Editing Session
//!
//! The single owner of the note index and the currently-open document
//! buffer. This is the surface a UI talks to: list, open, create, edit,
//! save-as, import, delete, clear. Nothing here writes to stdout or assumes
//! a terminal.
//!
//! All mutations originate from the session's owner; the one asynchronous
//! element is the auto-save worker, which shares the index behind a mutex.
//! Switching documents flushes the pending save (the payload was captured at
//! arm time, so flushing is always safe and loses nothing); an explicit save
//! cancels it, because the explicit write itself supersedes it.

use crate::autosave::{AutoSaveScheduler, PendingSave, DEFAULT_DELAY};
use crate::config::DEFAULT_FILE_EXT;
use crate::error::{JotterError, Result};
use crate::import;
use crate::index::NoteIndex;
use crate::model::{derive_title, Note, UNTITLED};
use crate::names;
use crate::store::SettingsStore;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub struct EditorSession<S: SettingsStore + Send + 'static> {
    index: Arc<Mutex<NoteIndex<S>>>,
    autosave: AutoSaveScheduler<S>,
    notes_dir: PathBuf,
    file_ext: String,
    /// Identity and location of the open document, if any.
    current: Option<(Uuid, PathBuf)>,
    /// Latest editor content. Tracked even before a document exists, so a
    /// scratch buffer can still be saved-as; never auto-saved in that state.
    buffer: String,
}

impl<S: SettingsStore + Send + 'static> EditorSession<S> {
    /// Loads the index from `store` and starts the auto-save worker with
    /// default settings. `notes_dir` is where new documents are created.
    pub fn new(store: S, notes_dir: PathBuf) -> Self {
        Self::with_options(store, notes_dir, DEFAULT_FILE_EXT.to_string(), DEFAULT_DELAY)
    }

    pub fn with_options(
        store: S,
        notes_dir: PathBuf,
        file_ext: String,
        autosave_delay: Duration,
    ) -> Self {
        let index = Arc::new(Mutex::new(NoteIndex::load(store)));
        let autosave = AutoSaveScheduler::new(Arc::clone(&index), autosave_delay);
        Self {
            index,
            autosave,
            notes_dir,
            file_ext,
            current: None,
            buffer: String::new(),
        }
    }

    /// Notes in display order, most recent first.
    pub fn list_notes(&self) -> Vec<Note> {
        self.index.lock().expect("note index lock").notes().to_vec()
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn current_note_id(&self) -> Option<Uuid> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    /// Opens a note and makes it the current document. Any save pending for
    /// the previously open document is flushed first, so nothing in flight
    /// can target the wrong file after the switch.
    pub fn open_note(&mut self, id: Uuid) -> Result<String> {
        self.autosave.flush();
        let note = self
            .index
            .lock()
            .expect("note index lock")
            .get(id)
            .cloned()
            .ok_or(JotterError::NoteNotFound(id))?;
        let content = fs::read_to_string(&note.location).map_err(JotterError::Io)?;
        self.current = Some((note.id, note.location));
        self.buffer = content.clone();
        Ok(content)
    }

    /// Creates a new empty document in the notes directory under a
    /// collision-free "Untitled" name, registers it at the front of the
    /// index, and makes it current.
    pub fn create_note(&mut self) -> Result<Note> {
        self.autosave.flush();
        fs::create_dir_all(&self.notes_dir).map_err(JotterError::Io)?;
        let location = names::resolve(&self.notes_dir, UNTITLED, &self.file_ext);
        fs::write(&location, "").map_err(JotterError::Io)?;

        let note = Note::new(location.clone(), "");
        self.index
            .lock()
            .expect("note index lock")
            .upsert(note.clone());
        self.current = Some((note.id, location));
        self.buffer.clear();
        Ok(note)
    }

    /// Records the latest editor content and (re)arms the auto-save delay.
    ///
    /// With no current document this only updates the scratch buffer; a
    /// never-created document is never auto-saved to disk.
    pub fn on_edit(&mut self, content: &str) {
        self.buffer = content.to_string();
        if let Some((id, location)) = &self.current {
            self.autosave.arm(PendingSave {
                note_id: *id,
                location: location.clone(),
                content: self.buffer.clone(),
            });
        }
    }

    /// Explicit save: resolves a collision-free path for `title` under
    /// `directory`, writes the buffer there synchronously, and records the
    /// result. The pending auto-save is cancelled first so it cannot land
    /// after this write with older content.
    ///
    /// With a current document, the note is re-targeted to the new location
    /// (the old file stays where it was). Without one, this is how a scratch
    /// buffer becomes a real document.
    pub fn save_current_as(&mut self, title: &str, directory: &Path) -> Result<Note> {
        self.autosave.cancel();
        fs::create_dir_all(directory).map_err(JotterError::Io)?;
        let location = names::resolve(directory, title, &self.file_ext);
        fs::write(&location, &self.buffer).map_err(JotterError::Io)?;

        let note = match self.current.take() {
            Some((id, _)) => Note {
                id,
                title: derive_title(&self.buffer),
                location: location.clone(),
                saved_at: Utc::now(),
            },
            None => Note::new(location.clone(), &self.buffer),
        };
        self.index
            .lock()
            .expect("note index lock")
            .upsert(note.clone());
        self.current = Some((note.id, location));
        Ok(note)
    }

    /// Registers an existing document without copying it: the note's
    /// location is the imported file itself, so subsequent auto-saves
    /// overwrite the original in place. Rich text is flattened; bytes that
    /// are not valid text fail with a decode error and nothing is
    /// registered.
    pub fn import(&mut self, path: &Path) -> Result<Note> {
        self.autosave.flush();
        let content = import::read_as_text(path)?;
        let location = fs::canonicalize(path).map_err(JotterError::Io)?;
        // The file's own mtime is the closest thing to "last written".
        let saved_at = fs::metadata(&location)
            .ok()
            .and_then(|meta| meta.modified().ok())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(Utc::now);

        let note = Note {
            id: Uuid::new_v4(),
            title: derive_title(&content),
            location: location.clone(),
            saved_at,
        };
        self.index
            .lock()
            .expect("note index lock")
            .upsert(note.clone());
        self.current = Some((note.id, location));
        self.buffer = content;
        Ok(note)
    }

    /// Re-reads a note's file after an out-of-band write (an external
    /// editor, say) and refreshes its title and saved_at.
    pub fn refresh_note(&mut self, id: Uuid) -> Result<Note> {
        let note = self
            .index
            .lock()
            .expect("note index lock")
            .get(id)
            .cloned()
            .ok_or(JotterError::NoteNotFound(id))?;
        let content = fs::read_to_string(&note.location).map_err(JotterError::Io)?;

        let updated = Note {
            id,
            title: derive_title(&content),
            location: note.location,
            saved_at: Utc::now(),
        };
        self.index
            .lock()
            .expect("note index lock")
            .upsert(updated.clone());
        Ok(updated)
    }

    /// Drops a note from the recent list. The backing file stays on disk.
    pub fn delete_from_recent(&mut self, id: Uuid) {
        self.index
            .lock()
            .expect("note index lock")
            .remove_from_index(id);
    }

    /// Deletes the backing file (best-effort) and drops the note from the
    /// index. If it was the current document, the pending auto-save is
    /// cancelled and the buffer discarded so nothing resurrects the file.
    pub fn delete_from_device(&mut self, id: Uuid) {
        if self.current.as_ref().is_some_and(|(cur, _)| *cur == id) {
            self.autosave.cancel();
            self.current = None;
            self.buffer.clear();
        }
        self.index
            .lock()
            .expect("note index lock")
            .delete_from_device(id);
    }

    /// Empties the recent list. No files are deleted. A pending auto-save is
    /// flushed first so the list being cleared is the converged one.
    pub fn clear_all(&mut self) {
        self.autosave.flush();
        self.index.lock().expect("note index lock").clear_all();
    }

    /// Writes any pending auto-save immediately. Also happens implicitly
    /// when the session is dropped.
    pub fn flush(&self) {
        self.autosave.flush();
    }
}
