use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{NotepadError, Result};
use crate::storage::{CorruptPolicy, DEFAULT_STORAGE_KEY};

pub const CONFIG_FILE: &str = "config.yaml";
pub const DATA_DIR_ENV: &str = "NOTEPAD_DATA_DIR";
const APP_DIR: &str = "notepad";
const FALLBACK_DIR: &str = ".notepad";

/// Settings read from `config.yaml` in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key the note collection is stored under.
    pub storage_key: String,
    /// What to do when the stored collection cannot be parsed.
    pub on_corrupt: CorruptPolicy,
    /// chrono format string for note timestamps.
    pub time_format: String,
    /// Format timestamps in UTC instead of the local timezone.
    pub utc: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            on_corrupt: CorruptPolicy::default(),
            time_format: "%b %-d, %Y, %-I:%M %p".to_string(),
            utc: false,
        }
    }
}

impl Config {
    /// Load `config.yaml` from `data_dir`, or defaults when it does not exist.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(NotepadError::Config("storage_key must not be empty".to_string()));
        }
        if self.time_format.trim().is_empty() {
            return Err(NotepadError::Config("time_format must not be empty".to_string()));
        }
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(NotepadError::Config(format!(
                "time_format is not a valid strftime format: {}",
                self.time_format
            )));
        }
        Ok(())
    }
}

/// Pick the data directory: explicit flag, then `NOTEPAD_DATA_DIR`, then the
/// platform data directory, then `./.notepad`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}
