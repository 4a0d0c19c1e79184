//! The detail pane. Which variant renders is decided by `(editing, selection)`:
//! the note form, a read-only note, or a placeholder.

use super::{View, ViewContext};
use crate::dom::{build, handler};
use crate::entity::Note;
use crate::state::{Action, UiState};

pub const PLACEHOLDER: &str = "Select a note or create a new one.";
pub const TITLE_FIELD: &str = "title";
pub const CONTENT_FIELD: &str = "content";

pub fn main_detail(notes: &[Note], state: &UiState, ctx: &ViewContext) -> View {
    let body = if state.editing {
        note_form(state.selected(notes))
    } else if let Some(note) = state.selected(notes) {
        note_view(note, ctx)
    } else {
        placeholder()
    };

    build("main", [("className", "main-detail".into())], [body.into()])
}

/// Create form when `note` is `None`, edit form pre-filled from it otherwise.
fn note_form(note: Option<&Note>) -> View {
    let heading = if note.is_some() { "Edit note" } else { "New note" };
    let title = note.map(|n| n.title.as_str()).unwrap_or_default();
    let content = note.map(|n| n.content.as_str()).unwrap_or_default();

    build(
        "form",
        [("className", "note-form".into()), ("onsubmit", handler(Action::SubmitForm))],
        [
            build("h2", [], [heading.into()]).into(),
            build("label", [("htmlFor", "note-title".into())], ["Title".into()]).into(),
            build(
                "input",
                [
                    ("id", "note-title".into()),
                    ("name", TITLE_FIELD.into()),
                    ("type", "text".into()),
                    ("placeholder", "Note title".into()),
                    ("value", title.into()),
                ],
                [],
            )
            .into(),
            build("label", [("htmlFor", "note-content".into())], ["Content".into()]).into(),
            build(
                "textarea",
                [
                    ("id", "note-content".into()),
                    ("name", CONTENT_FIELD.into()),
                    ("rows", "10".into()),
                    ("placeholder", "Write something...".into()),
                ],
                [content.into()],
            )
            .into(),
            build(
                "div",
                [("className", "form-actions".into())],
                [
                    build("button", [("type", "submit".into()), ("className", "btn btn-primary".into())], ["Save".into()])
                        .into(),
                    build(
                        "button",
                        [
                            ("type", "button".into()),
                            ("className", "btn".into()),
                            ("onclick", handler(Action::CancelEdit)),
                        ],
                        ["Cancel".into()],
                    )
                    .into(),
                ],
            )
            .into(),
        ],
    )
}

fn note_view(note: &Note, ctx: &ViewContext) -> View {
    let meta = format!(
        "Created {} · Updated {}",
        ctx.format_timestamp(note.created_at),
        ctx.format_timestamp(note.updated_at)
    );

    build(
        "article",
        [("className", "note-view".into()), ("data-id", note.id.as_str().into())],
        [
            build("h2", [], [note.display_title().into()]).into(),
            build("p", [("className", "note-meta".into())], [meta.into()]).into(),
            build("div", [("className", "note-content".into())], [note.content.as_str().into()]).into(),
            build(
                "div",
                [("className", "note-actions".into())],
                [
                    build(
                        "button",
                        [
                            ("type", "button".into()),
                            ("className", "btn".into()),
                            ("onclick", handler(Action::EditNote)),
                        ],
                        ["Edit".into()],
                    )
                    .into(),
                    build(
                        "button",
                        [
                            ("type", "button".into()),
                            ("className", "btn btn-danger".into()),
                            ("onclick", handler(Action::DeleteNote)),
                        ],
                        ["Delete".into()],
                    )
                    .into(),
                ],
            )
            .into(),
        ],
    )
}

fn placeholder() -> View {
    build(
        "div",
        [("className", "placeholder".into())],
        [build("p", [], [PLACEHOLDER.into()]).into()],
    )
}
