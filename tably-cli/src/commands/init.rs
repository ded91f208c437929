//! Init command implementation.
//!
//! Creates the data directory and an initialized database.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Initialize the data directory and database.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        // Opening with auto-create initializes directory and schema
        let db = open_database(global, &config)?;

        if !global.quiet {
            eprintln!("Initialized database at {}", db.config().path.display());
        }

        Ok(())
    }
}
