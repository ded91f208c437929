//! List command implementation.
//!
//! Lists reservations for a restaurant on a given date.

use clap::Args;
use tably::Database;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_date, GlobalOptions};

/// List reservations for a restaurant and date.
#[derive(Args)]
pub struct ListCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Reservation date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let reservations = Database::list_reservations(db.connection(), self.restaurant, date)?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&reservations)
                    .map_err(|e| CliError::Config(e.to_string()))?
            );
            return Ok(());
        }

        if reservations.is_empty() {
            if !global.quiet {
                eprintln!(
                    "No reservations for restaurant {} on {}",
                    self.restaurant, date
                );
            }
            return Ok(());
        }

        for reservation in reservations {
            println!(
                "{}\t{}\t{} guest(s)\t{}\t{}",
                reservation.id().map_or(0, |id| id.value()),
                reservation.time_slot(),
                reservation.guest_count(),
                reservation.status(),
                reservation.phone().unwrap_or("-"),
            );
        }

        Ok(())
    }
}
