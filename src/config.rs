//! Application configuration loading from `fintrack.toml` and the
//! environment.
//!
//! This covers where the data lives, not what the user configured inside the
//! app - the budget cap, rates, and display currency are persisted session
//! settings owned by the store, not configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "fintrack.toml";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_SEED_PATH: &str = "seed.json";

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory the blob store keeps its JSON files in.
    pub data_dir: PathBuf,
    /// Seed file consulted when no persisted record collection exists.
    pub seed_path: PathBuf,
}

/// Raw shape of the optional `fintrack.toml` file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    seed_path: Option<PathBuf>,
}

/// Loads the application configuration.
///
/// Sources, in priority order: the `FINTRACK_DATA_DIR` environment variable,
/// then `fintrack.toml` in the working directory, then built-in defaults.
/// A missing config file is fine; a malformed one is an error.
///
/// # Errors
/// Returns [`Error::Config`] when `fintrack.toml` exists but cannot be
/// parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let file = load_config_file(CONFIG_FILE)?;

    let data_dir = std::env::var_os("FINTRACK_DATA_DIR")
        .map(PathBuf::from)
        .or(file.data_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let seed_path = file
        .seed_path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH));

    Ok(AppConfig {
        data_dir,
        seed_path,
    })
}

fn load_config_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = match std::fs::read_to_string(path.as_ref()) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(err) => {
            return Err(Error::Config {
                message: format!("Failed to read {CONFIG_FILE}: {err}"),
            });
        }
    };

    toml::from_str(&contents).map_err(|err| Error::Config {
        message: format!("Failed to parse {CONFIG_FILE}: {err}"),
    })
}
