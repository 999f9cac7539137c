//! JSON import and export of the record collection.
//!
//! Export is a pretty-printed JSON array of the current records. Import is
//! the strict mirror: a malformed payload or a non-array top level is a hard
//! reject, while individually invalid elements inside a valid array are
//! silently dropped (filter, not fail) - the surviving records replace the
//! active collection wholesale. The same element validation backs the seed
//! path.

use crate::core::record::{Amount, Record};
use crate::core::validate::{self, RawRecord};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Hard-reject conditions for a whole import payload.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("the file is not valid JSON: {0}")]
    Malformed(String),

    #[error("the top-level value must be a JSON array of records")]
    NotAnArray,
}

/// Result of a successful import pass.
#[derive(Debug)]
pub struct ImportOutcome {
    /// The surviving, fully-validated records.
    pub records: Vec<Record>,
    /// How many elements were dropped as invalid.
    pub dropped: usize,
}

/// Serializes the collection to a pretty-printed JSON array.
///
/// # Errors
/// Serialization of validated records cannot realistically fail; the
/// `Result` just propagates the serde contract.
pub fn export_records(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parses a JSON array and runs every element through field validation.
///
/// Invalid elements (wrong shape, failed field rules, bad amount precision,
/// duplicate id) are dropped, not fatal. `now` fills in missing timestamps.
///
/// # Errors
/// [`ImportError`] when the payload itself is malformed or not an array.
pub fn import_records(
    text: &str,
    now: DateTime<Utc>,
) -> std::result::Result<ImportOutcome, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ImportError::Malformed(err.to_string()))?;
    let Value::Array(elements) = value else {
        return Err(ImportError::NotAnArray);
    };

    let total = elements.len();
    let mut records = Vec::with_capacity(total);
    let mut seen_ids: HashSet<String> = HashSet::new();
    for element in elements {
        match validate_element(element, now, &mut seen_ids) {
            Some(record) => records.push(record),
            None => debug!("dropped invalid import element"),
        }
    }

    let dropped = total - records.len();
    Ok(ImportOutcome { records, dropped })
}

// Loose shape of one incoming element; field validation happens afterwards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDraft {
    id: Option<String>,
    description: String,
    category: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: String,
    date: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// Validates one array element into a record, or `None` to drop it.
fn validate_element(
    element: Value,
    now: DateTime<Utc>,
    seen_ids: &mut HashSet<String>,
) -> Option<Record> {
    let draft: RecordDraft = serde_json::from_value(element).ok()?;

    // Amount invariants (non-negative, at most two decimals) on the raw
    // number, then the string-rule validation over the remaining fields.
    let amount = Amount::from_base_units_exact(draft.amount)?;
    let valid = validate::validate(&RawRecord {
        description: draft.description,
        category: draft.category,
        amount: amount.to_decimal_string(),
        kind: draft.kind,
        date: draft.date,
    })
    .ok()?;

    let id = match draft.id {
        Some(id) if !id.is_empty() => id,
        _ => Record::generate_id(),
    };
    // First occurrence of an id wins; later duplicates are dropped.
    if !seen_ids.insert(id.clone()) {
        return None;
    }

    Some(Record {
        id,
        description: valid.description,
        category: valid.category,
        amount: valid.amount,
        kind: valid.kind,
        date: valid.date,
        created_at: draft.created_at.unwrap_or(now),
        updated_at: draft.updated_at.unwrap_or(now),
    })
}
