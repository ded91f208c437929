//! Reap operation: release expired holds and cancel emptied reservations.
//!
//! The sweep finds every reservation with at least one lapsed HOLDING
//! assignment and releases it in its own transaction. The batch as a
//! whole is best-effort: a failure on one reservation is logged and the
//! sweep continues, and anything missed is corrected on the next tick.

use chrono::{DateTime, Utc};

use crate::database::Database;
use crate::error::Result;
use crate::table::ReservationId;

/// Result of a reap sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReapResult {
    /// Number of reservations whose expired holds were released.
    pub released: usize,

    /// Number of reservations transitioned to CANCELLED because no
    /// assignment rows survived the release.
    pub cancelled: usize,
}

/// Reap operations for releasing lapsed holds.
pub struct ReapOperations;

impl ReapOperations {
    /// Releases all holds that have lapsed as of now.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial expired-hold discovery fails;
    /// per-reservation failures are logged and skipped.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tably::database::{Database, DatabaseConfig};
    /// use tably::operations::ReapOperations;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
    /// let result = ReapOperations::reap(&mut db).unwrap();
    /// println!("released {} hold(s)", result.released);
    /// ```
    pub fn reap(db: &mut Database) -> Result<ReapResult> {
        Self::reap_at(db, Utc::now())
    }

    /// Releases all holds that have lapsed as of the given instant.
    ///
    /// Exposed separately so tests and backfills can pin the sweep time;
    /// production callers use [`ReapOperations::reap`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial expired-hold discovery fails.
    pub fn reap_at(db: &mut Database, now: DateTime<Utc>) -> Result<ReapResult> {
        let expired = Database::reservations_with_expired_holds(db.connection(), now)?;

        let mut result = ReapResult::default();
        for reservation_id in expired {
            match Self::release_one(db, reservation_id, now) {
                Ok((released, cancelled)) => {
                    if released {
                        result.released += 1;
                    }
                    if cancelled {
                        result.cancelled += 1;
                    }
                }
                Err(e) => {
                    // Best-effort sweep: skip and retry on the next tick
                    log::warn!(
                        "failed to release expired hold for reservation {reservation_id}: {e}"
                    );
                }
            }
        }

        if result.released > 0 {
            log::info!(
                "released {} expired hold(s), cancelled {} reservation(s)",
                result.released,
                result.cancelled
            );
        }

        Ok(result)
    }

    /// Releases one reservation's lapsed holds in its own transaction.
    ///
    /// The expiry predicate is re-evaluated inside the transaction, so a
    /// hold confirmed between discovery and release (its expiration
    /// cleared) is left untouched. If the release leaves the reservation
    /// with zero assignment rows it transitions to CANCELLED; this is the
    /// sole writer of the timeout PENDING to CANCELLED transition.
    fn release_one(
        db: &mut Database,
        reservation_id: ReservationId,
        now: DateTime<Utc>,
    ) -> Result<(bool, bool)> {
        let tx = db.begin_transaction()?;

        let deleted = Database::delete_expired_holdings(&tx, reservation_id, now)?;
        if deleted == 0 {
            // Lost the race against a confirm; nothing to do.
            return Ok((false, false));
        }

        let cancelled = if Database::count_assignments(&tx, reservation_id)? == 0 {
            Database::cancel_reservation(&tx, reservation_id)?;
            true
        } else {
            false
        };

        tx.commit()?;
        Ok((true, cancelled))
    }
}
