//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI
//! commands: argument parsing for dates and times, configuration
//! loading, and database management.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use tably::{Config, ConfigBuilder, Database, DatabaseConfig};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The data directory's config.yaml
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_data_dir(global.data_dir.clone())
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options.
fn resolve_database_path(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    // Priority: global option > config > default
    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.join("tably.db"));
    }
    if let Some(ref data_dir) = config.data_dir {
        return Ok(data_dir.join("tably.db"));
    }

    // Default: ~/.tably/tably.db
    let home_dir = home::home_dir()
        .ok_or_else(|| CliError::Config("Could not determine home directory".to_string()))?;

    Ok(home_dir.join(".tably").join("tably.db"))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global, config)?;

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    // Set busy timeout if specified
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Parse a reservation date in YYYY-MM-DD form.
pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("invalid date '{value}', expected YYYY-MM-DD"))
    })
}

/// Parse an arrival time in HH:MM or HH:MM:SS form.
pub fn parse_time(value: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            CliError::InvalidArguments(format!("invalid time '{value}', expected HH:MM"))
        })
}

/// Format a UTC timestamp for display.
pub fn format_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2025-07-22").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 22).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("22/07/2025").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_parse_time_both_forms() {
        let short = parse_time("12:30").unwrap();
        let long = parse_time("12:30:00").unwrap();
        assert_eq!(short, long);
        assert!(parse_time("noonish").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        use chrono::TimeZone;
        let ts = chrono::Utc.with_ymd_and_hms(2025, 7, 22, 12, 30, 45).unwrap();
        assert_eq!(format_timestamp(ts), "2025-07-22 12:30:45");
    }
}
