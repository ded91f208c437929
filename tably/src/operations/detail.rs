//! Reservation detail lookup.
//!
//! Fetches a reservation together with its assigned table types and the
//! earliest live hold expiration, for display back to the guest.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::table::{ReservationId, TableId, TableType};

/// A reservation with its assigned tables and hold expiry.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationDetail {
    /// The reservation row.
    pub reservation: Reservation,

    /// The assigned table units with their capacity categories.
    pub tables: Vec<(TableId, TableType)>,

    /// The earliest live hold expiration, while any hold is live.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ReservationDetail {
    /// Fetches the detail view of a reservation.
    ///
    /// With `holding_only`, a reservation without a live hold (unknown,
    /// lapsed, confirmed, or cancelled) reports not found - the shape the
    /// guest-facing hold status page needs.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist, or has
    ///   no live hold while `holding_only` is set
    /// - [`Error::Database`] on storage failures
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tably::database::{Database, DatabaseConfig};
    /// use tably::operations::ReservationDetail;
    /// use tably::ReservationId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
    /// let detail = ReservationDetail::fetch(&db, ReservationId::new(7), true).unwrap();
    /// println!("{} table(s)", detail.tables.len());
    /// ```
    pub fn fetch(db: &Database, id: ReservationId, holding_only: bool) -> Result<Self> {
        fn not_found(id: ReservationId) -> Error {
            Error::NotFound {
                resource: format!("reservation {id}"),
            }
        }

        let reservation =
            Database::get_reservation(db.connection(), id)?.ok_or_else(|| not_found(id))?;

        let expires_at = Database::min_live_hold_expiration(db.connection(), id)?;

        if holding_only {
            match expires_at {
                Some(expiry) if expiry > Utc::now() => {}
                _ => return Err(not_found(id)),
            }
        }

        let tables = Database::assigned_tables(db.connection(), id)?;

        Ok(Self {
            reservation,
            tables,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::operations::confirm::{ConfirmOperation, ConfirmOptions};
    use crate::operations::hold::{HoldOperation, HoldOptions};
    use crate::table::TableType;
    use chrono::{NaiveDate, NaiveTime};

    fn hold(db: &mut Database) -> ReservationId {
        Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();
        let options = HoldOptions::new(
            1,
            4,
            NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            "555-0100",
        );
        HoldOperation::execute(db, &options).unwrap().hold_id
    }

    #[test]
    fn test_fetch_live_hold() {
        let mut db = create_test_database();
        let id = hold(&mut db);

        let detail = ReservationDetail::fetch(&db, id, true).unwrap();
        assert_eq!(detail.reservation.id(), Some(id));
        assert_eq!(detail.tables.len(), 1);
        assert_eq!(detail.tables[0].1, TableType::Four);
        assert!(detail.expires_at.is_some());
    }

    #[test]
    fn test_fetch_unknown_reservation() {
        let db = create_test_database();
        let err = ReservationDetail::fetch(&db, ReservationId::new(404), false).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_fetch_holding_only_rejects_lapsed_hold() {
        let mut db = create_test_database();
        let id = hold(&mut db);

        db.connection()
            .execute(
                "UPDATE reservation_tables SET hold_expiration = hold_expiration - 600
                 WHERE reservation_id = ?1",
                [id.value()],
            )
            .unwrap();

        let err = ReservationDetail::fetch(&db, id, true).unwrap_err();
        assert!(err.is_not_found());

        // Without the flag the reservation is still visible
        let detail = ReservationDetail::fetch(&db, id, false).unwrap();
        assert_eq!(detail.tables.len(), 1);
    }

    #[test]
    fn test_fetch_confirmed_reservation() {
        let mut db = create_test_database();
        let id = hold(&mut db);
        ConfirmOperation::execute(&mut db, &ConfirmOptions::new(id, "555-0100")).unwrap();

        // No live hold remains, so holding-only reports not found
        let err = ReservationDetail::fetch(&db, id, true).unwrap_err();
        assert!(err.is_not_found());

        let detail = ReservationDetail::fetch(&db, id, false).unwrap();
        assert_eq!(detail.expires_at, None);
        assert_eq!(detail.tables.len(), 1);
    }
}
