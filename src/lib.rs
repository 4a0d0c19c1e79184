pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dom;
pub mod entity;
pub mod error;
pub mod host;
pub mod repository;
pub mod state;
pub mod storage;
pub mod view;

pub use app::{App, Outcome};
pub use error::{NotepadError, Result};
pub use repository::NoteRepository;
pub use state::{Action, UiState};
