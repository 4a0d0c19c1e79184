// src/entity/note.rs
use serde::{Deserialize, Serialize};

use crate::error::{NotepadError, Result};

/// Identifier of a note: the creation time in milliseconds, as a string.
pub type NoteId = String;

/// A persisted note, stored with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    pub fn new(id: NoteId, title: String, content: String, now_ms: i64) -> Self {
        Self {
            id,
            title,
            content,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Title to show in lists; falls back when the stored title is blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Title and content as submitted from a form, trimmed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: &str, content: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(NotepadError::Validation("Title is required".to_string()));
        }
        Ok(Self {
            title: title.to_string(),
            content: content.trim().to_string(),
        })
    }
}
