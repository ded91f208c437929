//! Cancel operation: explicit user-driven cancellation.
//!
//! Unlike expiry-driven release, cancellation is requested by the guest
//! and may target a pending hold or a confirmed booking. It follows the
//! same locking discipline as confirmation: one IMMEDIATE transaction
//! deletes the assignment rows and flips the reservation to CANCELLED.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::table::ReservationId;

/// Options for a cancel operation.
#[derive(Debug, Clone)]
pub struct CancelOptions {
    /// The reservation to cancel.
    pub reservation_id: ReservationId,

    /// The requesting user. When set, the reservation must belong to
    /// this user; the surrounding authorization layer supplies it.
    pub user_id: Option<i64>,
}

impl CancelOptions {
    /// Creates cancel options for a reservation.
    #[must_use]
    pub const fn new(reservation_id: ReservationId) -> Self {
        Self {
            reservation_id,
            user_id: None,
        }
    }

    /// Requires the reservation to belong to the given user.
    #[must_use]
    pub const fn with_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }
}

/// Outcome of a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    /// The cancelled reservation.
    pub reservation_id: ReservationId,

    /// Number of table units released back to the inventory.
    pub released_tables: usize,
}

/// The cancel operation.
pub struct CancelOperation;

impl CancelOperation {
    /// Cancels a reservation, releasing its table units.
    ///
    /// Pending and confirmed reservations may be cancelled; a cancelled
    /// reservation is terminal and refuses. An owner mismatch reports
    /// the reservation as not found, so reservation ids cannot be probed
    /// on behalf of other users.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist or
    ///   belongs to a different user
    /// - [`Error::Validation`] if the reservation is already cancelled
    /// - [`Error::Database`] on storage failures
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tably::database::{Database, DatabaseConfig};
    /// use tably::operations::{CancelOperation, CancelOptions};
    /// use tably::ReservationId;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
    /// let options = CancelOptions::new(ReservationId::new(7)).with_user(Some(3));
    /// let outcome = CancelOperation::execute(&mut db, &options).unwrap();
    /// println!("released {} table(s)", outcome.released_tables);
    /// ```
    pub fn execute(db: &mut Database, options: &CancelOptions) -> Result<CancelOutcome> {
        let tx = db.begin_transaction()?;

        let reservation = Database::get_reservation(&tx, options.reservation_id)?.ok_or_else(
            || Error::NotFound {
                resource: format!("reservation {}", options.reservation_id),
            },
        )?;

        if let Some(user_id) = options.user_id {
            if reservation.user_id() != Some(user_id) {
                return Err(Error::NotFound {
                    resource: format!("reservation {}", options.reservation_id),
                });
            }
        }

        if reservation.status() == crate::reservation::ReservationStatus::Cancelled {
            return Err(Error::Validation {
                field: "status".into(),
                message: "reservation is already cancelled".into(),
            });
        }

        let released_tables = Database::delete_assignments(&tx, options.reservation_id)?;
        Database::cancel_reservation(&tx, options.reservation_id)?;

        tx.commit()?;

        Ok(CancelOutcome {
            reservation_id: options.reservation_id,
            released_tables,
        })
    }
}
