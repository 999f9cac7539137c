//! Core business logic - framework-agnostic record, search, sort, and
//! statistics operations. Everything here is pure and synchronous; I/O lives
//! in the `store` and `cli` layers.

/// Derived statistics (totals, categories, cap status, 7-day trend)
pub mod aggregate;
/// Display-currency conversion and amount formatting
pub mod currency;
/// The `Ledger` orchestrator composing the other core modules
pub mod engine;
/// The record model and fixed-point amounts
pub mod record;
/// Regex search, filtering, and highlighting
pub mod search;
/// Session settings (cap, rates, display currency)
pub mod settings;
/// Stable view ordering
pub mod sort;
/// Field validation and normalization
pub mod validate;
