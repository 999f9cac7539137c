//! Command-line surface - argument parsing and command handlers.
//!
//! This is the rendering collaborator for the record engine: handlers load
//! the session state, run one engine pass or mutation, persist, and print.
//! All visual presentation (tables, highlight markers, trend bars) lives
//! here, outside the core.

/// Import and export commands
pub mod exchange;
/// Record mutation commands (add, edit, delete)
pub mod record;
/// Settings display and save
pub mod settings;
/// The list and stats views
pub mod view;

use crate::core::engine::Ledger;
use crate::errors::Result;
use crate::store::{BlobStore, session};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A personal finance ledger for the command line.
#[derive(Debug, Parser)]
#[command(name = "fintrack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new income or expense record
    Add(record::AddArgs),
    /// Edit an existing record by id
    Edit(record::EditArgs),
    /// Delete a record by id
    Delete {
        /// Id of the record to delete
        id: String,
    },
    /// Show the record table, optionally filtered by a regex
    List(view::ListArgs),
    /// Show the dashboard: totals, statistics, cap status, 7-day trend
    Stats(view::StatsArgs),
    /// Show or change the budget cap, conversion rates, and display currency
    Settings(settings::SettingsArgs),
    /// Replace the record collection with a JSON array from a file
    Import {
        /// Path of the JSON file to import
        file: PathBuf,
    },
    /// Export the record collection as pretty-printed JSON
    Export {
        /// Destination file; stdout when omitted
        file: Option<PathBuf>,
    },
}

/// Dispatches a parsed command against the loaded session state.
///
/// # Errors
/// Propagates storage and import failures; per-field validation problems are
/// printed, not returned.
pub fn dispatch<S: BlobStore>(command: Command, ledger: &mut Ledger, store: &S) -> Result<()> {
    match command {
        Command::Add(args) => record::add(ledger, store, &args),
        Command::Edit(args) => record::edit(ledger, store, &args),
        Command::Delete { id } => record::delete(ledger, store, &id),
        Command::List(args) => view::list(ledger, &args),
        Command::Stats(args) => view::stats(ledger, &args),
        Command::Settings(args) => settings::run(ledger, store, &args),
        Command::Import { file } => exchange::import(ledger, store, &file),
        Command::Export { file } => exchange::export(ledger, file.as_deref()),
    }
}

/// Persists the current record collection after a successful mutation.
pub(crate) fn persist_records<S: BlobStore>(ledger: &Ledger, store: &S) -> Result<()> {
    session::save_records(store, ledger.records())
}
