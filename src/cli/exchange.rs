//! Import and export commands.
//!
//! Export writes the collection as pretty-printed JSON to a file or stdout.
//! Import replaces the collection wholesale with the validated survivors of a
//! JSON array, so the user is told how many elements were kept and dropped.

use crate::cli::persist_records;
use crate::core::engine::Ledger;
use crate::errors::Result;
use crate::store::{BlobStore, exchange};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Replaces the record collection with the contents of a JSON file.
///
/// # Errors
/// A malformed payload or a non-array top level aborts the import; the
/// current collection is left untouched.
pub fn import<S: BlobStore>(ledger: &mut Ledger, store: &S, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)?;
    let outcome = exchange::import_records(&text, Utc::now())?;

    info!(
        kept = outcome.records.len(),
        dropped = outcome.dropped,
        "imported record collection"
    );
    let kept = outcome.records.len();
    ledger.replace_all(outcome.records);
    persist_records(ledger, store)?;

    println!("Imported {kept} record(s) from {}.", file.display());
    if outcome.dropped > 0 {
        println!("Skipped {} invalid element(s).", outcome.dropped);
    }
    Ok(())
}

/// Writes the collection as pretty-printed JSON to `file`, or stdout when
/// no file is given.
pub fn export(ledger: &Ledger, file: Option<&Path>) -> Result<()> {
    let json = exchange::export_records(ledger.records())?;
    match file {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!(
                "Exported {} record(s) to {}.",
                ledger.records().len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
