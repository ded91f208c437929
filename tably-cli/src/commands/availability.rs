//! Availability command implementation.
//!
//! Runs the allocator without committing writes and reports whether a
//! party could currently be seated.

use clap::Args;
use tably::CheckAvailability;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_date, parse_time, GlobalOptions};

/// Check whether a party could be seated.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Reservation date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Arrival time (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub arrival: String,

    /// Number of guests
    #[arg(long, value_name = "COUNT")]
    pub guests: i64,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    ///
    /// Prints `available` or `unavailable`; the exit code is 0 either
    /// way, since an unavailable slot is an answer, not a failure.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let arrival = parse_time(&self.arrival)?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let available =
            CheckAvailability::execute(&db, self.restaurant, date, arrival, self.guests)?;

        println!("{}", if available { "available" } else { "unavailable" });

        Ok(())
    }
}
