//! Typed configuration from environment variables.
//!
//! Loads once at startup and fails fast on a bad policy file, so a
//! deadline table with gaps never reaches evaluation.

use std::path::PathBuf;

use crate::deadline::DeadlineTable;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Config {
    /// SQLite file holding the case register.
    pub database_path: PathBuf,
    /// Optional TOML file overriding the standard deadline windows.
    pub policy_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_path: optional_var("TENGGAT_DB")?
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("tenggat.db")),
            policy_path: optional_var("TENGGAT_POLICY")?.map(PathBuf::from),
            log_level: optional_var("LOG_LEVEL")?.unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The deadline table: the policy file if configured, else the
    /// standard windows.
    pub fn deadline_table(&self) -> Result<DeadlineTable> {
        match &self.policy_path {
            Some(path) => DeadlineTable::load(path),
            None => Ok(DeadlineTable::STANDARD),
        }
    }
}

/// Unset or blank is `None`; a value that is not valid unicode is an error.
fn optional_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(Error::Config(format!(
            "environment variable {name} is not valid unicode"
        ))),
    }
}
