//! Confirm operation: promote a live hold to a confirmed booking.
//!
//! Confirmation is the only path that permanently allocates tables. It is
//! deliberately not idempotent: a second confirm finds no live HOLDING
//! rows and reports the hold as expired or invalid, which also covers
//! lapsed and unknown holds.

use chrono::Utc;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::table::ReservationId;

/// Options for a confirm operation.
///
/// # Examples
///
/// ```
/// use tably::operations::ConfirmOptions;
/// use tably::ReservationId;
///
/// let options = ConfirmOptions::new(ReservationId::new(7), "555-0100")
///     .with_note(Some("birthday".to_string()));
/// assert_eq!(options.phone, "555-0100");
/// ```
#[derive(Debug, Clone)]
pub struct ConfirmOptions {
    /// The hold to confirm.
    pub reservation_id: ReservationId,

    /// Contact phone recorded on the confirmed booking.
    pub phone: String,

    /// Optional guest note recorded on the confirmed booking.
    pub note: Option<String>,
}

impl ConfirmOptions {
    /// Creates confirm options with the required fields.
    #[must_use]
    pub fn new(reservation_id: ReservationId, phone: impl Into<String>) -> Self {
        Self {
            reservation_id,
            phone: phone.into(),
            note: None,
        }
    }

    /// Sets the guest note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// Outcome of a successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOutcome {
    /// The confirmed reservation.
    pub reservation_id: ReservationId,

    /// Number of table units permanently allocated.
    pub confirmed_tables: usize,
}

/// The confirm operation.
pub struct ConfirmOperation;

impl ConfirmOperation {
    /// Atomically validates a live hold and promotes it.
    ///
    /// Inside one IMMEDIATE transaction: count HOLDING assignments with
    /// `hold_expiration` in the future; if none exist the transaction
    /// rolls back and the hold is reported expired or invalid. Otherwise
    /// every HOLDING row flips to CONFIRMED with its expiration cleared,
    /// and the reservation becomes CONFIRMED with the supplied contact
    /// fields.
    ///
    /// A confirm racing a reap at the expiry boundary is resolved by
    /// whichever transaction commits first; the loser observes zero
    /// matching rows and reports failure without corrupting state.
    ///
    /// # Errors
    ///
    /// - [`Error::HoldExpired`] if the hold lapsed, was already
    ///   confirmed, or the id is unknown
    /// - [`Error::Validation`] if the phone is empty
    /// - [`Error::Database`] on storage failures
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tably::database::{Database, DatabaseConfig};
    /// use tably::operations::{ConfirmOperation, ConfirmOptions};
    /// use tably::ReservationId;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
    /// let options = ConfirmOptions::new(ReservationId::new(7), "555-0100");
    /// match ConfirmOperation::execute(&mut db, &options) {
    ///     Ok(outcome) => println!("confirmed {} tables", outcome.confirmed_tables),
    ///     Err(e) if e.is_hold_expired() => println!("hold lapsed, start over"),
    ///     Err(e) => eprintln!("error: {e}"),
    /// }
    /// ```
    pub fn execute(db: &mut Database, options: &ConfirmOptions) -> Result<ConfirmOutcome> {
        let phone = options.phone.trim();
        if phone.is_empty() {
            return Err(Error::Validation {
                field: "phone".into(),
                message: "phone must be non-empty".into(),
            });
        }

        let now = Utc::now();
        let tx = db.begin_transaction()?;

        let live = Database::count_live_holdings(&tx, options.reservation_id, now)?;
        if live == 0 {
            // Rollback on drop; the hold lapsed, was confirmed already,
            // or never existed.
            return Err(Error::HoldExpired {
                reservation_id: options.reservation_id.value(),
            });
        }

        let confirmed_tables = Database::confirm_assignments(&tx, options.reservation_id)?;
        Database::confirm_reservation(&tx, options.reservation_id, phone, options.note.as_deref())?;

        tx.commit()?;

        Ok(ConfirmOutcome {
            reservation_id: options.reservation_id,
            confirmed_tables,
        })
    }
}
