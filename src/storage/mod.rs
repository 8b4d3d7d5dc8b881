pub mod kv;
pub mod preferences;

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use preferences::{BookmarkOutcome, PreferenceStore, Preferences};
