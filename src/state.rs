//! UI state and the actions bound to rendered elements.

use crate::entity::{Note, NoteId};

/// Transient selection/editing flags. Lives only as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub selected_note_id: Option<NoteId>,
    pub editing: bool,
}

impl UiState {
    /// The selected note, if the selection still resolves in `notes`.
    pub fn selected<'a>(&self, notes: &'a [Note]) -> Option<&'a Note> {
        let id = self.selected_note_id.as_deref()?;
        notes.iter().find(|n| n.id == id)
    }

    /// "+ New": open a blank form.
    pub fn start_new(self) -> Self {
        Self {
            selected_note_id: None,
            editing: true,
        }
    }

    /// Pick a note from the list and show it read-only.
    pub fn select(self, id: NoteId) -> Self {
        Self {
            selected_note_id: Some(id),
            editing: false,
        }
    }

    pub fn start_edit(self) -> Self {
        Self {
            editing: true,
            ..self
        }
    }

    pub fn stop_edit(self) -> Self {
        Self {
            editing: false,
            ..self
        }
    }

    pub fn clear_selection(self) -> Self {
        Self {
            selected_note_id: None,
            editing: false,
        }
    }
}

/// What a listener does when its event fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewNote,
    SelectNote(NoteId),
    EditNote,
    DeleteNote,
    SubmitForm,
    CancelEdit,
}
