use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Corrupt data under storage key '{key}': {source}")]
    CorruptStorage {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NotepadError>;
