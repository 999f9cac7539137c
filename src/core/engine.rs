//! The record engine - composes validation, search, sort, and aggregation
//! into the request/response cycle.
//!
//! `Ledger` is the single explicit state object (records + settings), owned
//! by the orchestrating caller; every module call receives it by reference
//! and there are no ambient globals. Each external event runs one full
//! synchronous pass: filter, sort, aggregate, highlight.

use crate::core::aggregate::{self, Snapshot};
use crate::core::record::Record;
use crate::core::search::{self, Matcher, Segment};
use crate::core::settings::Settings;
use crate::core::sort::{self, SortSpec};
use crate::core::validate::{self, FieldErrors, RawRecord, ValidRecord, Warning};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use tracing::debug;

/// The live search input: a raw pattern plus the case-sensitivity toggle.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    pub pattern: String,
    pub case_insensitive: bool,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            case_insensitive: true,
        }
    }
}

impl ViewQuery {
    #[must_use]
    pub fn new(pattern: &str, case_insensitive: bool) -> Self {
        Self {
            pattern: pattern.to_string(),
            case_insensitive,
        }
    }
}

/// One row of the rendered view: the record plus highlight segments for its
/// searched string fields.
#[derive(Debug, Clone)]
pub struct RecordRow {
    pub record: Record,
    pub description: Vec<Segment>,
    pub category: Vec<Segment>,
}

/// Everything the renderer needs for one recompute pass.
#[derive(Debug, Clone)]
pub struct ViewOutput {
    pub rows: Vec<RecordRow>,
    pub snapshot: Snapshot,
    /// True when the query held a pattern that failed to compile; the rows
    /// are then the unfiltered collection (fail-open) and the renderer shows
    /// an "invalid pattern" notice.
    pub invalid_pattern: bool,
}

/// A successful add/edit: the stored record and any advisory warnings.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub record: Record,
    pub warnings: Vec<Warning>,
}

/// Why an edit was rejected. Either way the collection is untouched.
#[derive(Debug)]
pub enum EditError {
    NotFound,
    Invalid(FieldErrors),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::Invalid(errors) => errors.fmt(f),
        }
    }
}

/// In-memory session state: the record collection and settings.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<Record>,
    settings: Settings,
}

impl Ledger {
    #[must_use]
    pub fn new(records: Vec<Record>, settings: Settings) -> Self {
        Self { records, settings }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings wholesale (the save action).
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Validates raw fields and appends a new record.
    ///
    /// # Errors
    /// Returns the collected field errors without touching the collection.
    pub fn add(
        &mut self,
        raw: &RawRecord,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome, FieldErrors> {
        let valid = validate::validate(raw)?;
        let record = materialize(valid.clone(), Record::generate_id(), now, now);
        debug!(id = %record.id, "record added");
        self.records.push(record.clone());
        Ok(MutationOutcome {
            record,
            warnings: valid.warnings,
        })
    }

    /// Validates raw fields and overwrites the mutable fields of the record
    /// with `id`, refreshing `updated_at`. The id and `created_at` are
    /// immutable.
    ///
    /// # Errors
    /// [`EditError::NotFound`] for an unknown id, [`EditError::Invalid`] when
    /// validation fails; the collection stays unchanged in both cases.
    pub fn edit(
        &mut self,
        id: &str,
        raw: &RawRecord,
        now: DateTime<Utc>,
    ) -> Result<MutationOutcome, EditError> {
        // Validate on the staged input before looking anything up, so a
        // failure can never leave a half-edited record behind.
        let valid = validate::validate(raw).map_err(EditError::Invalid)?;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(EditError::NotFound)?;

        record.description = valid.description.clone();
        record.category = valid.category.clone();
        record.amount = valid.amount;
        record.kind = valid.kind;
        record.date = valid.date.clone();
        record.updated_at = now;

        debug!(id = %record.id, "record edited");
        Ok(MutationOutcome {
            record: record.clone(),
            warnings: valid.warnings,
        })
    }

    /// Removes the record with `id`, returning it, or `None` if absent.
    pub fn delete(&mut self, id: &str) -> Option<Record> {
        let index = self.records.iter().position(|record| record.id == id)?;
        debug!(id, "record deleted");
        Some(self.records.remove(index))
    }

    /// Swaps in a fully-validated replacement collection (the import path).
    pub fn replace_all(&mut self, records: Vec<Record>) {
        debug!(count = records.len(), "record collection replaced");
        self.records = records;
    }

    /// Runs one full recompute pass: filter, sort, aggregate, highlight.
    ///
    /// A pattern that fails to compile is fail-open: the view covers the
    /// whole collection and `invalid_pattern` is set for the renderer.
    #[must_use]
    pub fn view(&self, query: &ViewQuery, sort_spec: SortSpec, today: NaiveDate) -> ViewOutput {
        let pattern = query.pattern.trim();
        let matcher = Matcher::compile(pattern, query.case_insensitive);
        let invalid_pattern = !pattern.is_empty() && matcher.is_none();

        let mut filtered = search::filter(&self.records, matcher.as_ref());
        sort::sort_records(&mut filtered, sort_spec);

        let snapshot = aggregate::aggregate(&filtered, &self.settings, today);

        let rows = filtered
            .into_iter()
            .map(|record| RecordRow {
                description: search::highlight(&record.description, matcher.as_ref()),
                category: search::highlight(&record.category, matcher.as_ref()),
                record: record.clone(),
            })
            .collect();

        ViewOutput {
            rows,
            snapshot,
            invalid_pattern,
        }
    }
}

fn materialize(
    valid: ValidRecord,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Record {
    Record {
        id,
        description: valid.description,
        category: valid.category,
        amount: valid.amount,
        kind: valid.kind,
        date: valid.date,
        created_at,
        updated_at,
    }
}
