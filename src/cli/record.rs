//! Record mutation commands - add, edit, delete.
//!
//! Validation failures are surfaced per field and never leave a partial
//! mutation behind: the engine validates on a staged copy and this layer only
//! persists after a successful mutation.

use crate::cli::persist_records;
use crate::core::engine::{EditError, Ledger, MutationOutcome};
use crate::core::validate::{FieldErrors, RawRecord};
use crate::errors::{Error, Result};
use crate::store::BlobStore;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// What the money was for
    #[arg(long, short = 'd')]
    pub description: String,
    /// Category name (letters, single spaces or hyphens)
    #[arg(long, short = 'c')]
    pub category: String,
    /// Amount in the base currency, up to 2 decimals
    #[arg(long, short = 'a')]
    pub amount: String,
    /// "income" or "expense"
    #[arg(long, short = 't', value_name = "TYPE")]
    pub kind: String,
    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the record to edit
    pub id: String,
    /// New description; unchanged when omitted
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    /// New category; unchanged when omitted
    #[arg(long, short = 'c')]
    pub category: Option<String>,
    /// New amount; unchanged when omitted
    #[arg(long, short = 'a')]
    pub amount: Option<String>,
    /// New type; unchanged when omitted
    #[arg(long, short = 't', value_name = "TYPE")]
    pub kind: Option<String>,
    /// New date; unchanged when omitted
    #[arg(long)]
    pub date: Option<String>,
}

/// Validates and appends a new record, then persists the collection.
pub fn add<S: BlobStore>(ledger: &mut Ledger, store: &S, args: &AddArgs) -> Result<()> {
    let raw = RawRecord {
        description: args.description.clone(),
        category: args.category.clone(),
        amount: args.amount.clone(),
        kind: args.kind.clone(),
        date: args.date.clone(),
    };

    match ledger.add(&raw, Utc::now()) {
        Ok(outcome) => {
            persist_records(ledger, store)?;
            report_success("Added", &outcome);
            Ok(())
        }
        Err(errors) => {
            report_field_errors(&errors);
            Ok(())
        }
    }
}

/// Edits the record with `args.id`; omitted fields keep their current value.
pub fn edit<S: BlobStore>(ledger: &mut Ledger, store: &S, args: &EditArgs) -> Result<()> {
    // Fill omitted fields from the stored record so the engine always sees a
    // complete raw form, like a pre-populated edit form.
    let current = ledger
        .records()
        .iter()
        .find(|record| record.id == args.id)
        .ok_or_else(|| Error::RecordNotFound {
            id: args.id.clone(),
        })?;

    let raw = RawRecord {
        description: args
            .description
            .clone()
            .unwrap_or_else(|| current.description.clone()),
        category: args
            .category
            .clone()
            .unwrap_or_else(|| current.category.clone()),
        amount: args
            .amount
            .clone()
            .unwrap_or_else(|| current.amount.to_decimal_string()),
        kind: args
            .kind
            .clone()
            .unwrap_or_else(|| current.kind.as_str().to_string()),
        date: args.date.clone().unwrap_or_else(|| current.date.clone()),
    };

    match ledger.edit(&args.id, &raw, Utc::now()) {
        Ok(outcome) => {
            persist_records(ledger, store)?;
            report_success("Updated", &outcome);
            Ok(())
        }
        Err(EditError::Invalid(errors)) => {
            report_field_errors(&errors);
            Ok(())
        }
        Err(EditError::NotFound) => Err(Error::RecordNotFound {
            id: args.id.clone(),
        }),
    }
}

/// Removes a record by id and persists the collection.
pub fn delete<S: BlobStore>(ledger: &mut Ledger, store: &S, id: &str) -> Result<()> {
    let removed = ledger
        .delete(id)
        .ok_or_else(|| Error::RecordNotFound { id: id.to_string() })?;
    persist_records(ledger, store)?;
    println!("Deleted '{}' ({})", removed.description, removed.id);
    Ok(())
}

fn report_success(verb: &str, outcome: &MutationOutcome) {
    println!("{} '{}' ({})", verb, outcome.record.description, outcome.record.id);
    for warning in &outcome.warnings {
        println!("Warning: {warning}");
    }
}

fn report_field_errors(errors: &FieldErrors) {
    println!("The record was not saved:");
    for error in errors.iter() {
        println!("  {}: {}", error.field(), error.message());
    }
}
