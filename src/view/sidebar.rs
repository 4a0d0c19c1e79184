use super::{View, ViewContext};
use crate::dom::{build, handler, Child};
use crate::entity::Note;
use crate::state::{Action, UiState};

pub const EMPTY_MESSAGE: &str = "No notes yet. Create one with + New.";

/// The note list, newest first, or an empty-state message.
pub fn sidebar(notes: &[Note], state: &UiState, ctx: &ViewContext) -> View {
    let body: View = if notes.is_empty() {
        build("p", [("className", "empty-state".into())], [EMPTY_MESSAGE.into()])
    } else {
        build(
            "ul",
            [("className", "note-list".into())],
            notes.iter().map(|note| Child::from(note_item(note, state, ctx))),
        )
    };

    build("aside", [("className", "sidebar".into())], [body.into()])
}

fn note_item(note: &Note, state: &UiState, ctx: &ViewContext) -> View {
    let active = state.selected_note_id.as_deref() == Some(note.id.as_str());
    let class = if active { "note-item active" } else { "note-item" };

    build(
        "li",
        [
            ("className", class.into()),
            ("tabindex", "0".into()),
            ("data-id", note.id.as_str().into()),
            ("onclick", handler(Action::SelectNote(note.id.clone()))),
            ("onkeydown", handler(Action::SelectNote(note.id.clone()))),
        ],
        [
            build("div", [("className", "note-item-title".into())], [note.display_title().into()]).into(),
            build(
                "div",
                [("className", "note-item-date".into())],
                [ctx.format_timestamp(note.updated_at).into()],
            )
            .into(),
        ],
    )
}
