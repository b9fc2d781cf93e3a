//! Runtime configuration from the environment and an optional `.env` file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DB_PATH_VAR: &str = "EVENTCAL_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "EVENTCAL_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "EVENTCAL_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "eventcal.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "eventcal-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
}

impl Config {
    /// Reads `.env` (when present) into the process environment, then builds
    /// the config from it.
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err).context("failed to read .env file");
            }
        }

        let cwd = std::env::current_dir().context("failed to resolve current directory")?;
        Ok(Self::from_lookup(|key| std::env::var(key).ok(), &cwd))
    }

    /// Builds the config from `lookup`, resolving a relative log directory
    /// against `cwd`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, cwd: &Path) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = non_empty(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let log_level = non_empty(LOG_LEVEL_VAR)
            .unwrap_or_else(|| eventcal_core::default_log_level().to_string());
        let log_dir = match non_empty(LOG_DIR_VAR).map(PathBuf::from) {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}
