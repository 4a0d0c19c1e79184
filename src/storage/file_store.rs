use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{CorruptPolicy, KeyValueStore};
use crate::error::{NotepadError, Result};

const STORAGE_FILE: &str = "storage.json";

/// Key-value store persisted as a single JSON object file.
///
/// The file is re-read on every lookup and rewritten in full on every
/// mutation, so the last writer wins. A file that is not a JSON object is
/// handled per `CorruptPolicy`: under `Reset` it reads as empty and the next
/// write replaces it.
pub struct FileStore {
    path: PathBuf,
    on_corrupt: CorruptPolicy,
}

impl FileStore {
    /// Open the store inside `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(STORAGE_FILE),
            on_corrupt: CorruptPolicy::default(),
        })
    }

    pub fn on_corrupt(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => match self.on_corrupt {
                CorruptPolicy::Reset => {
                    warn!(path = %self.path.display(), error = %e, "unreadable store file, treating it as empty");
                    Ok(BTreeMap::new())
                }
                CorruptPolicy::Fail => Err(NotepadError::Storage(format!(
                    "unreadable store file {}: {}",
                    self.path.display(),
                    e
                ))),
            },
        }
    }

    fn write_items(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = items.len(), "wrote store file");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_items()?;
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.read_items()?;
        if items.remove(key).is_some() {
            self.write_items(&items)?;
        }
        Ok(())
    }
}
