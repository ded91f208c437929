//! Background expiry reaper.
//!
//! A cancellable periodic task that sweeps lapsed holds on a fixed
//! interval. The reaper owns its own database connection, independent of
//! request-serving connections, and applies the same transactional
//! discipline as request handlers. Because expiry lives entirely in
//! stored timestamps, a reaper started after a process restart resumes
//! from persisted state alone.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::database::Database;
use crate::operations::ReapOperations;

/// Default sweep interval: once per minute.
pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to a running background reaper.
///
/// Dropping the handle without calling [`Reaper::stop`] detaches the
/// thread; it keeps sweeping until the process exits.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use tably::database::{Database, DatabaseConfig};
/// use tably::Reaper;
///
/// let db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
/// let reaper = Reaper::spawn(db, Duration::from_secs(60)).unwrap();
/// // ... serve requests ...
/// reaper.stop();
/// ```
#[derive(Debug)]
pub struct Reaper {
    handle: JoinHandle<()>,
    shutdown: Sender<()>,
}

impl Reaper {
    /// Starts the reaper on its own thread with a dedicated connection.
    ///
    /// Each tick runs one [`ReapOperations::reap`] sweep. Sweep failures
    /// are logged and do not stop the loop; a missed sweep is corrected
    /// on the next tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the reaper thread cannot be spawned.
    pub fn spawn(db: Database, interval: Duration) -> crate::error::Result<Self> {
        let (shutdown, ticks) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("tably-reaper".into())
            .spawn(move || {
                let mut db = db;
                loop {
                    match ticks.recv_timeout(interval) {
                        // Shutdown requested, or the handle was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {
                            if let Err(e) = ReapOperations::reap(&mut db) {
                                log::warn!("expiry sweep failed: {e}");
                            }
                        }
                    }
                }
            })?;

        Ok(Self { handle, shutdown })
    }

    /// Signals the reaper to stop and waits for the thread to finish.
    ///
    /// The current sweep, if one is running, completes first.
    pub fn stop(self) {
        // Ignore send failure: the thread already exited
        let _ = self.shutdown.send(());
        let _ = self.handle.join();
    }

    /// Returns `true` while the reaper thread is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConfig;
    use crate::operations::{HoldOperation, HoldOptions};
    use crate::reservation::ReservationStatus;
    use crate::table::TableType;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    #[test]
    fn test_reaper_releases_expired_holds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
        Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();

        let options = HoldOptions::new(
            1,
            4,
            NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            "555-0100",
        );
        let hold_id = HoldOperation::execute(&mut db, &options).unwrap().hold_id;

        // Lapse the hold by rewriting its expiration into the past
        db.connection()
            .execute(
                "UPDATE reservation_tables SET hold_expiration = hold_expiration - 600",
                [],
            )
            .unwrap();

        // Run the reaper on its own connection at a short interval
        let reaper_db = Database::open(DatabaseConfig::new(&path)).unwrap();
        let reaper = Reaper::spawn(reaper_db, Duration::from_millis(50)).unwrap();
        assert!(reaper.is_running());

        // Give it a few ticks
        thread::sleep(Duration::from_millis(400));
        reaper.stop();

        let reservation = Database::get_reservation(db.connection(), hold_id)
            .unwrap()
            .unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Cancelled);
    }

    #[test]
    fn test_reaper_stop_joins_thread() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();

        let reaper = Reaper::spawn(db, Duration::from_secs(3600)).unwrap();
        assert!(reaper.is_running());
        // Stop returns promptly even with a long interval
        reaper.stop();
    }
}
