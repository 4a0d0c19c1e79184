mod note;

pub use note::{Note, NoteDraft, NoteId};
