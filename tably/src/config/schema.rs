//! Configuration schema definitions.
//!
//! This module defines the configuration structure for tably, covering
//! the data directory, expiry reaping, and database lock behavior.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Complete configuration structure.
///
/// All fields are optional; unset fields fall back to built-in defaults.
/// Values merge across sources with file values overridden by
/// environment variables.
///
/// # Examples
///
/// ```
/// use tably::config::{Config, ReapingConfig};
///
/// let config = Config {
///     reaping: Some(ReapingConfig {
///         interval_seconds: Some(30),
///         disabled: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.reap_interval_seconds(), 30);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data directory holding the database file.
    pub data_dir: Option<PathBuf>,

    /// Expiry reaping settings.
    pub reaping: Option<ReapingConfig>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

impl Config {
    /// Returns the effective reap interval in seconds.
    ///
    /// Defaults to 60 (once per minute) when unset.
    #[must_use]
    pub fn reap_interval_seconds(&self) -> u64 {
        self.reaping
            .as_ref()
            .and_then(|r| r.interval_seconds)
            .unwrap_or(60)
    }

    /// Returns `true` if background reaping is disabled.
    #[must_use]
    pub fn reaping_disabled(&self) -> bool {
        self.reaping
            .as_ref()
            .and_then(|r| r.disabled)
            .unwrap_or(false)
    }

    /// Merges another configuration over this one.
    ///
    /// Fields set in `other` win; unset fields keep their current value.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if let Some(other_reaping) = other.reaping {
            let reaping = self.reaping.get_or_insert_with(Default::default);
            if other_reaping.interval_seconds.is_some() {
                reaping.interval_seconds = other_reaping.interval_seconds;
            }
            if other_reaping.disabled.is_some() {
                reaping.disabled = other_reaping.disabled;
            }
        }
        if other.maximum_lock_wait_seconds.is_some() {
            self.maximum_lock_wait_seconds = other.maximum_lock_wait_seconds;
        }
        self
    }
}

/// Expiry reaping configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReapingConfig {
    /// Sweep interval in seconds (default 60).
    pub interval_seconds: Option<u64>,

    /// Disable the background reaper entirely.
    pub disabled: Option<bool>,
}

/// Builder that assembles the effective configuration from defaults,
/// an optional file, and environment overrides.
///
/// # Examples
///
/// ```no_run
/// use tably::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// println!("reap every {}s", config.reap_interval_seconds());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the data directory searched for `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Builds the effective configuration.
    ///
    /// Precedence, lowest to highest: built-in defaults, the data
    /// directory's `config.yaml` (if present), `TABLY_*` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed, or an environment variable holds an invalid value.
    pub fn build(self) -> crate::error::Result<Config> {
        let mut config = Config::default();

        if let Some(file_config) =
            super::loader::ConfigLoader::load_user_config(self.data_dir.as_deref())?
        {
            config = config.merged_with(file_config);
        }

        super::environment::EnvironmentConfig::apply_overrides(&mut config)?;

        Ok(config)
    }
}
