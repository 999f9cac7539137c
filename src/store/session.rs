//! Loading and saving the persisted session state.
//!
//! Everything here is fail-open: a missing or corrupted blob degrades to an
//! empty collection or default settings with a logged warning, never a
//! crashed session. The seed source is consulted exactly once, when no
//! persisted record collection exists, and its payload goes through the same
//! per-element validation as an import before being persisted back.

use crate::core::record::Record;
use crate::core::settings::Settings;
use crate::errors::Result;
use crate::store::blob::{BlobStore, RECORDS_KEY, SETTINGS_KEY};
use crate::store::exchange;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// A one-shot asynchronous source for the initial record collection.
pub trait SeedSource {
    /// Fetches the raw seed payload. No retry; a failure just means an empty
    /// starting collection.
    fn fetch(&self) -> impl Future<Output = Result<String>>;
}

/// Seed data read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSeed {
    path: std::path::PathBuf,
}

impl FileSeed {
    #[must_use]
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SeedSource for FileSeed {
    async fn fetch(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// Reads the persisted record collection; `None` when nothing usable is
/// stored (missing key, unreadable blob, or JSON that fails to parse).
fn load_persisted_records<S: BlobStore>(store: &S) -> Option<Vec<Record>> {
    let blob = match store.get(RECORDS_KEY) {
        Ok(blob) => blob?,
        Err(err) => {
            warn!(%err, "failed to read persisted records; starting empty");
            return None;
        }
    };
    match serde_json::from_str(&blob) {
        Ok(records) => Some(records),
        Err(err) => {
            warn!(%err, "persisted records are corrupted; treating as no data");
            None
        }
    }
}

/// Loads the record collection, falling back to the seed source when no
/// persisted collection exists. Seeded records are validated element by
/// element and immediately persisted back.
pub async fn load_or_seed_records<S: BlobStore, F: SeedSource>(
    store: &S,
    seed: &F,
    now: DateTime<Utc>,
) -> Vec<Record> {
    if let Some(records) = load_persisted_records(store) {
        return records;
    }

    let payload = match seed.fetch().await {
        Ok(payload) => payload,
        Err(err) => {
            info!(%err, "no seed data available; starting with an empty collection");
            return Vec::new();
        }
    };

    match exchange::import_records(&payload, now) {
        Ok(outcome) => {
            if outcome.dropped > 0 {
                warn!(dropped = outcome.dropped, "seed elements failed validation");
            }
            info!(count = outcome.records.len(), "seeded record collection");
            if let Err(err) = save_records(store, &outcome.records) {
                warn!(%err, "failed to persist seeded records");
            }
            outcome.records
        }
        Err(err) => {
            warn!(%err, "seed payload rejected; starting with an empty collection");
            Vec::new()
        }
    }
}

/// Persists the record collection as a pretty-printed JSON array.
///
/// # Errors
/// Propagates store write failures.
pub fn save_records<S: BlobStore>(store: &S, records: &[Record]) -> Result<()> {
    store.set(RECORDS_KEY, &exchange::export_records(records)?)
}

/// Loads settings, falling back to defaults when nothing usable is stored.
pub fn load_settings<S: BlobStore>(store: &S) -> Settings {
    let blob = match store.get(SETTINGS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Settings::default(),
        Err(err) => {
            warn!(%err, "failed to read persisted settings; using defaults");
            return Settings::default();
        }
    };
    serde_json::from_str(&blob).unwrap_or_else(|err| {
        warn!(%err, "persisted settings are corrupted; using defaults");
        Settings::default()
    })
}

/// Persists the settings object wholesale.
///
/// # Errors
/// Propagates store write failures.
pub fn save_settings<S: BlobStore>(store: &S, settings: &Settings) -> Result<()> {
    store.set(SETTINGS_KEY, &serde_json::to_string_pretty(settings)?)
}
