//! Confirm command implementation.
//!
//! Promotes a live hold to a confirmed booking.

use clap::Args;
use tably::{ConfirmOperation, ConfirmOptions, ReservationId};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Confirm a held reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// The hold id returned by `hold`
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation_id: i64,

    /// Contact phone recorded on the booking
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// Optional guest note
    #[arg(long, value_name = "NOTE")]
    pub note: Option<String>,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options = ConfirmOptions::new(ReservationId::new(self.reservation_id), self.phone)
            .with_note(self.note);

        let outcome = ConfirmOperation::execute(&mut db, &options)?;

        if !global.quiet {
            println!(
                "Confirmed reservation {} ({} table unit(s))",
                outcome.reservation_id, outcome.confirmed_tables
            );
        }

        Ok(())
    }
}
