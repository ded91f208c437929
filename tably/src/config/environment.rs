//! Environment variable handling for configuration overrides.
//!
//! This module provides support for TABLY_* environment variables that
//! override configuration file values.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use tably::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads the TABLY_* environment variables and applies them to the
    /// configuration with higher precedence than file-based values.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g. a non-numeric interval).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // TABLY_DATA_DIR
        if let Some(dir) = env::var_os("TABLY_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        // TABLY_REAP_INTERVAL (seconds)
        if let Ok(seconds) = env::var("TABLY_REAP_INTERVAL") {
            let seconds = Self::parse_u64("TABLY_REAP_INTERVAL", &seconds)?;
            let reaping = config.reaping.get_or_insert_with(Default::default);
            reaping.interval_seconds = Some(seconds);
        }

        // TABLY_DISABLE_REAPING
        if let Ok(val) = env::var("TABLY_DISABLE_REAPING") {
            let disabled = Self::parse_bool("TABLY_DISABLE_REAPING", &val)?;
            let reaping = config.reaping.get_or_insert_with(Default::default);
            reaping.disabled = Some(disabled);
        }

        // TABLY_MAX_LOCK_WAIT (seconds)
        if let Ok(seconds) = env::var("TABLY_MAX_LOCK_WAIT") {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_u64("TABLY_MAX_LOCK_WAIT", &seconds)?);
        }

        Ok(())
    }

    /// Parses a positive integer environment value.
    fn parse_u64(field: &str, value: &str) -> Result<u64> {
        value.parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: "Must be a positive integer".into(),
        })
    }

    /// Parses a boolean environment value.
    ///
    /// Accepts: "true"/"false", "1"/"0", "yes"/"no" (case-insensitive).
    fn parse_bool(field: &str, value: &str) -> Result<bool> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid boolean value '{value}'"),
            }),
        }
    }
}
