mod file_store;
mod kv;
mod note_store;

pub use file_store::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use note_store::{CorruptPolicy, NoteStore, DEFAULT_STORAGE_KEY};
