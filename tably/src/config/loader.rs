//! Configuration file discovery and loading.
//!
//! This module loads the user configuration file from the data
//! directory, when one exists.

use std::fs;
use std::path::Path;

use crate::config::schema::Config;
use crate::database::default_data_dir;
use crate::error::Result;

/// Loads configuration from the data directory.
///
/// # Examples
///
/// ```no_run
/// use tably::config::ConfigLoader;
///
/// let config = ConfigLoader::load_user_config(None).unwrap();
/// println!("config file present: {}", config.is_some());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the user configuration file.
    ///
    /// If `data_dir` is provided, loads from `{data_dir}/config.yaml`;
    /// otherwise from the default data directory (`~/.tably/config.yaml`).
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<Config>> {
        let config_path = match data_dir {
            Some(dir) => dir.join("config.yaml"),
            None => default_data_dir()?.join("config.yaml"),
        };

        if !config_path.exists() {
            return Ok(None);
        }

        Ok(Some(Self::load_file(&config_path)?))
    }

    /// Loads and parses one YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}
