//! Configuration for the tably reservation engine.
//!
//! Configuration merges from three sources, lowest precedence first:
//! built-in defaults, the data directory's `config.yaml`, and `TABLY_*`
//! environment variables.
//!
//! # Examples
//!
//! ```no_run
//! use tably::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("reap every {}s", config.reap_interval_seconds());
//! ```

mod environment;
mod loader;
mod schema;

pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use schema::{Config, ConfigBuilder, ReapingConfig};
