//! Shared test utilities.
//!
//! Helper constructors for records, raw input, and settings with sensible
//! defaults, so individual tests only spell out the fields they care about.

#![allow(clippy::unwrap_used)]

use crate::core::record::{Amount, Record, RecordKind};
use crate::core::settings::Settings;
use crate::core::validate::RawRecord;
use chrono::{NaiveDate, Utc};

/// Creates a validated-shape record with a generated id and fresh timestamps.
fn record(
    description: &str,
    category: &str,
    major_units: i64,
    kind: RecordKind,
    date: &str,
) -> Record {
    let now = Utc::now();
    Record {
        id: Record::generate_id(),
        description: description.to_string(),
        category: category.to_string(),
        amount: Amount::from_major_units(major_units),
        kind,
        date: date.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Creates a test expense record. `date` is a `YYYY-MM-DD` string.
pub fn expense(description: &str, category: &str, major_units: i64, date: &str) -> Record {
    record(description, category, major_units, RecordKind::Expense, date)
}

/// Creates a test income record. `date` is a `YYYY-MM-DD` string.
pub fn income(description: &str, category: &str, major_units: i64, date: &str) -> Record {
    record(description, category, major_units, RecordKind::Income, date)
}

/// Creates unvalidated raw input, as the input surface would hand it over.
pub fn raw_record(
    description: &str,
    category: &str,
    amount: &str,
    kind: &str,
    date: &str,
) -> RawRecord {
    RawRecord {
        description: description.to_string(),
        category: category.to_string(),
        amount: amount.to_string(),
        kind: kind.to_string(),
        date: date.to_string(),
    }
}

/// A fixed "today" so trend windows in tests are deterministic.
pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str("2024-03-05", "%Y-%m-%d").unwrap()
}

/// Default settings with a spending cap, in base-currency major units.
pub fn settings_with_cap(major_units: i64) -> Settings {
    Settings {
        cap: Amount::from_major_units(major_units),
        ..Settings::default()
    }
}
