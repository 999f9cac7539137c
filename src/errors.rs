//! Unified error types and result handling.
//!
//! Domain-level outcomes that are part of a module contract (per-field
//! validation errors, soft-dropped import elements) are modeled by the owning
//! module; this enum covers the failures that cross module boundaries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No record with id '{id}'")]
    RecordNotFound { id: String },

    #[error("Invalid setting: {message}")]
    InvalidSetting { message: String },

    #[error("Import rejected: {0}")]
    Import(#[from] crate::store::exchange::ImportError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
