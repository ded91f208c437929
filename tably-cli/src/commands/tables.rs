//! Tables command implementation.
//!
//! Lists a restaurant's table inventory rows.

use clap::Args;
use tably::Database;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// List a restaurant's table inventory.
#[derive(Args)]
pub struct TablesCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TablesCommand {
    /// Execute the tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let units = Database::list_table_units(db.connection(), self.restaurant)?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&units)
                    .map_err(|e| CliError::Config(e.to_string()))?
            );
            return Ok(());
        }

        if units.is_empty() {
            if !global.quiet {
                eprintln!("No tables registered for restaurant {}", self.restaurant);
            }
            return Ok(());
        }

        for unit in units {
            println!(
                "{}\t{}\tx{}",
                unit.id(),
                unit.table_type(),
                unit.quantity()
            );
        }

        Ok(())
    }
}
