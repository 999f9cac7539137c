//! Persistence boundary - blob store, session state codecs, seed loading,
//! and the JSON import/export surface.

/// The key-value blob store trait and its file/in-memory backends
pub mod blob;
/// JSON import/export of the record collection
pub mod exchange;
/// Fail-open loading and saving of records and settings, plus seeding
pub mod session;

pub use blob::{BlobStore, FileStore, MemoryStore, RECORDS_KEY, SETTINGS_KEY};
