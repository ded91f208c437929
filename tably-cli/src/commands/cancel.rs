//! Cancel command implementation.
//!
//! Explicit user-driven cancellation of a reservation.

use clap::Args;
use tably::{CancelOperation, CancelOptions, ReservationId};

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Cancel a reservation.
#[derive(Args)]
pub struct CancelCommand {
    /// The reservation to cancel
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation_id: i64,

    /// Requesting user; the reservation must belong to this user
    #[arg(long, value_name = "ID")]
    pub user: Option<i64>,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let options =
            CancelOptions::new(ReservationId::new(self.reservation_id)).with_user(self.user);

        let outcome = CancelOperation::execute(&mut db, &options)?;

        if !global.quiet {
            println!(
                "Cancelled reservation {}, released {} table unit(s)",
                outcome.reservation_id, outcome.released_tables
            );
        }

        Ok(())
    }
}
