//! Show command implementation.
//!
//! Displays a reservation with its assigned tables and hold expiry.

use clap::Args;
use tably::{ReservationDetail, ReservationId};

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_database, GlobalOptions};

/// Show a reservation with its assigned tables.
#[derive(Args)]
pub struct ShowCommand {
    /// The reservation to show
    #[arg(value_name = "RESERVATION_ID")]
    pub reservation_id: i64,

    /// Only show the reservation while its hold is live
    #[arg(long)]
    pub holding: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let detail = ReservationDetail::fetch(
            &db,
            ReservationId::new(self.reservation_id),
            self.holding,
        )?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&detail)
                    .map_err(|e| CliError::Config(e.to_string()))?
            );
            return Ok(());
        }

        let reservation = &detail.reservation;
        println!(
            "Reservation {} at restaurant {}: {} guest(s), {} {} ({})",
            self.reservation_id,
            reservation.restaurant_id(),
            reservation.guest_count(),
            reservation.date(),
            reservation.arrival_time().format("%H:%M"),
            reservation.time_slot(),
        );
        println!("Status: {}", reservation.status());

        for (table_id, table_type) in &detail.tables {
            println!("  table {table_id}: {table_type}");
        }

        if let Some(expires_at) = detail.expires_at {
            println!("Hold expires: {}", format_timestamp(expires_at));
        }

        if !global.verbose {
            return Ok(());
        }
        if let Some(phone) = reservation.phone() {
            println!("Phone: {phone}");
        }
        if let Some(note) = reservation.note() {
            println!("Note: {note}");
        }

        Ok(())
    }
}
