//! # Debounced Auto-Save
//!
//! Coalesces rapid edits into a single disk write per quiet period. One save
//! slot for the whole scheduler: arming replaces the previous payload and
//! restarts the delay, so three keystrokes inside the window produce one
//! write carrying the last content.
//!
//! The payload captures note id, location, and content **at arm time**. The
//! worker never reads live editor state, so a delay that fires after the
//! editor has moved on to another document still writes the right bytes to
//! the right file.
//!
//! The worker performs its write while holding the scheduler state lock.
//! That makes [`AutoSaveScheduler::cancel`] a synchronous barrier: once it
//! returns, no stale write can land afterwards, which is what the explicit
//! save path needs before it writes newer content itself.

use crate::index::NoteIndex;
use crate::model::{derive_title, Note};
use crate::store::SettingsStore;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::warn;
use uuid::Uuid;

/// Default quiet period before an edit is written to disk.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// A write captured at arm time.
#[derive(Debug, Clone)]
pub struct PendingSave {
    pub note_id: Uuid,
    pub location: PathBuf,
    pub content: String,
}

struct State {
    pending: Option<PendingSave>,
    deadline: Option<Instant>,
    shutdown: bool,
}

struct Shared {
    state: Mutex<State>,
    wakeup: Condvar,
    saves: AtomicUsize,
}

pub struct AutoSaveScheduler<S: SettingsStore> {
    shared: Arc<Shared>,
    index: Arc<Mutex<NoteIndex<S>>>,
    delay: Duration,
    worker: Option<JoinHandle<()>>,
}

impl<S: SettingsStore + Send + 'static> AutoSaveScheduler<S> {
    pub fn new(index: Arc<Mutex<NoteIndex<S>>>, delay: Duration) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                pending: None,
                deadline: None,
                shutdown: false,
            }),
            wakeup: Condvar::new(),
            saves: AtomicUsize::new(0),
        });

        let worker_shared = Arc::clone(&shared);
        let worker_index = Arc::clone(&index);
        let worker = thread::spawn(move || run_worker(worker_shared, worker_index));

        Self {
            shared,
            index,
            delay,
            worker: Some(worker),
        }
    }
}

impl<S: SettingsStore> AutoSaveScheduler<S> {
    /// (Re)arms the delay with a freshly captured payload, replacing any
    /// save still pending. Only one delay is ever outstanding.
    pub fn arm(&self, save: PendingSave) {
        let mut state = self.shared.state.lock().expect("scheduler state lock");
        state.pending = Some(save);
        state.deadline = Some(Instant::now() + self.delay);
        self.shared.wakeup.notify_one();
    }

    /// Discards any pending save. Blocks while a write whose delay already
    /// expired is in flight, so nothing stale lands after this returns.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock().expect("scheduler state lock");
        state.pending = None;
        state.deadline = None;
    }

    /// Writes any pending save right now instead of waiting out the delay.
    pub fn flush(&self) {
        let mut state = self.shared.state.lock().expect("scheduler state lock");
        state.deadline = None;
        if let Some(save) = state.pending.take() {
            write_through(&self.index, &self.shared.saves, &save);
        }
    }

    /// Number of background saves that have completed successfully.
    pub fn completed_saves(&self) -> usize {
        self.shared.saves.load(Ordering::Relaxed)
    }
}

impl<S: SettingsStore> Drop for AutoSaveScheduler<S> {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().expect("scheduler state lock");
            state.shutdown = true;
            self.shared.wakeup.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker<S: SettingsStore>(shared: Arc<Shared>, index: Arc<Mutex<NoteIndex<S>>>) {
    let mut state = shared.state.lock().expect("scheduler state lock");
    loop {
        if state.shutdown {
            // Drain rather than drop: content typed just before shutdown
            // still reaches disk.
            if let Some(save) = state.pending.take() {
                write_through(&index, &shared.saves, &save);
            }
            return;
        }
        match state.deadline {
            None => {
                state = shared.wakeup.wait(state).expect("scheduler state lock");
            }
            Some(deadline) => {
                let now = Instant::now();
                if now < deadline {
                    let (guard, _) = shared
                        .wakeup
                        .wait_timeout(state, deadline - now)
                        .expect("scheduler state lock");
                    state = guard;
                } else {
                    state.deadline = None;
                    if let Some(save) = state.pending.take() {
                        write_through(&index, &shared.saves, &save);
                    }
                }
            }
        }
    }
}

/// Writes the captured content and, only if the write succeeded, records the
/// save in the index: fresh title, fresh saved_at, position preserved for an
/// existing id.
fn write_through<S: SettingsStore>(
    index: &Mutex<NoteIndex<S>>,
    saves: &AtomicUsize,
    save: &PendingSave,
) {
    if let Err(err) = fs::write(&save.location, &save.content) {
        warn!(
            note = %save.note_id,
            location = %save.location.display(),
            error = %err,
            "auto-save write failed"
        );
        return;
    }
    let note = Note {
        id: save.note_id,
        title: derive_title(&save.content),
        location: save.location.clone(),
        saved_at: Utc::now(),
    };
    index.lock().expect("note index lock").upsert(note);
    saves.fetch_add(1, Ordering::Relaxed);
}
