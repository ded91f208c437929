//! Add-tables command implementation.
//!
//! Registers one table inventory row: `quantity` identical physical
//! units of one capacity category at a restaurant.

use clap::Args;
use tably::{Database, TableType};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Register table inventory for a restaurant.
#[derive(Args)]
pub struct AddTablesCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Table capacity: 2, 4, or 6 seats
    #[arg(long = "type", value_name = "SEATS")]
    pub table_type: String,

    /// Number of identical physical units
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    pub quantity: i64,
}

impl AddTablesCommand {
    /// Execute the add-tables command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let table_type = TableType::try_from(self.table_type.as_str())
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        if self.quantity < 1 {
            return Err(CliError::InvalidArguments(
                "quantity must be at least 1".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let id = Database::create_table_unit(
            db.connection(),
            self.restaurant,
            table_type,
            self.quantity,
        )?;

        if global.quiet {
            println!("{id}");
        } else {
            println!(
                "Added {} x {} at restaurant {} (table id {id})",
                self.quantity, table_type, self.restaurant
            );
        }

        Ok(())
    }
}
