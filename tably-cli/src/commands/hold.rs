//! Hold command implementation.
//!
//! Holds tables for a party, printing the hold id and its expiry.

use clap::Args;
use tably::{HoldOperation, HoldOptions};

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, parse_date, parse_time, GlobalOptions,
};

/// Hold tables for a party.
#[derive(Args)]
pub struct HoldCommand {
    /// Restaurant id
    #[arg(long, value_name = "ID")]
    pub restaurant: i64,

    /// Booking user id
    #[arg(long, value_name = "ID")]
    pub user: Option<i64>,

    /// Number of guests
    #[arg(long, value_name = "COUNT")]
    pub guests: i64,

    /// Reservation date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Arrival time (HH:MM); before 15:00 is lunch, later is dinner
    #[arg(long, value_name = "TIME")]
    pub arrival: String,

    /// Contact phone
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// Optional guest note
    #[arg(long, value_name = "NOTE")]
    pub note: Option<String>,
}

impl HoldCommand {
    /// Execute the hold command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let arrival = parse_time(&self.arrival)?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options = HoldOptions::new(self.restaurant, self.guests, date, arrival, self.phone)
            .with_user(self.user)
            .with_note(self.note);

        let outcome = HoldOperation::execute(&mut db, &options)?;

        if global.quiet {
            println!("{}", outcome.hold_id);
        } else {
            println!(
                "Hold {} on {} table unit(s), expires {}",
                outcome.hold_id,
                outcome.table_count,
                format_timestamp(outcome.expires_at)
            );
        }

        Ok(())
    }
}
