use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::entity::Note;
use crate::error::{NotepadError, Result};

pub const DEFAULT_STORAGE_KEY: &str = "notes-app.notes";

/// What `load` does when the stored blob is not a valid note array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Log and start over with an empty collection.
    #[default]
    Reset,
    /// Surface `NotepadError::CorruptStorage`.
    Fail,
}

impl std::str::FromStr for CorruptPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reset" => Ok(Self::Reset),
            "fail" => Ok(Self::Fail),
            _ => Err(format!("Invalid corrupt-storage policy: {}", s)),
        }
    }
}

/// Stores the whole note collection as one JSON array under a single key.
pub struct NoteStore<S> {
    kv: S,
    key: String,
    on_corrupt: CorruptPolicy,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            on_corrupt: CorruptPolicy::default(),
        }
    }

    pub fn on_corrupt(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Read every stored note, in stored order.
    pub fn load(&self) -> Result<Vec<Note>> {
        let raw = match self.kv.get_item(&self.key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                debug!(key = %self.key, count = notes.len(), "loaded notes");
                Ok(notes)
            }
            Err(source) => match self.on_corrupt {
                CorruptPolicy::Reset => {
                    warn!(key = %self.key, error = %source, "corrupt note data, starting with an empty collection");
                    Ok(Vec::new())
                }
                CorruptPolicy::Fail => Err(NotepadError::CorruptStorage {
                    key: self.key.clone(),
                    source,
                }),
            },
        }
    }

    /// Overwrite the stored collection with `notes`.
    pub fn save(&mut self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)?;
        self.kv.set_item(&self.key, &json)?;
        debug!(key = %self.key, count = notes.len(), "saved notes");
        Ok(())
    }
}
