//! CRUD over the persisted note collection.
//!
//! Every operation loads the full collection, applies the change and writes
//! the full collection back. A missing note is reported as `None` or treated
//! as a no-op; only storage failures come back as errors.

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::entity::Note;
use crate::error::Result;
use crate::storage::{KeyValueStore, NoteStore};

pub struct NoteRepository<S, C = SystemClock> {
    store: NoteStore<S>,
    clock: C,
}

impl<S: KeyValueStore> NoteRepository<S, SystemClock> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NoteRepository<S, C> {
    pub fn with_clock(store: NoteStore<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All notes, most recently updated first. Equal timestamps keep stored order.
    pub fn list(&self) -> Result<Vec<Note>> {
        let mut notes = self.store.load()?;
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    pub fn get(&self, id: &str) -> Result<Option<Note>> {
        Ok(self.store.load()?.into_iter().find(|n| n.id == id))
    }

    /// Create a note stamped with the current time and put it at the front.
    pub fn create(&mut self, title: &str, content: &str) -> Result<Note> {
        let mut notes = self.store.load()?;
        let now = self.clock.now_millis();

        // Two creates inside the same millisecond would share an id.
        let mut stamp = now;
        while notes.iter().any(|n| n.id == stamp.to_string()) {
            stamp += 1;
        }

        let note = Note::new(stamp.to_string(), title.to_string(), content.to_string(), now);
        notes.insert(0, note.clone());
        self.store.save(&notes)?;

        info!(id = %note.id, "created note");
        Ok(note)
    }

    /// Replace title and content of an existing note. Returns `None` when `id` is unknown.
    pub fn update(&mut self, id: &str, title: &str, content: &str) -> Result<Option<Note>> {
        let mut notes = self.store.load()?;
        let now = self.clock.now_millis();

        let updated = match notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.title = title.to_string();
                note.content = content.to_string();
                note.updated_at = now;
                note.clone()
            }
            None => {
                debug!(id, "update skipped, note not found");
                return Ok(None);
            }
        };

        self.store.save(&notes)?;
        info!(id, "updated note");
        Ok(Some(updated))
    }

    /// Remove the note with `id`, if any, and persist the rest.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut notes = self.store.load()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        self.store.save(&notes)?;

        if notes.len() < before {
            info!(id, "deleted note");
        } else {
            debug!(id, "delete found nothing to remove");
        }
        Ok(())
    }
}
