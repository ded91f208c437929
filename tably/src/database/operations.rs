//! Database CRUD operations for tables, reservations, and assignments.
//!
//! This module implements all row-level operations used by the engine.
//! Every function takes a plain `&Connection` so it can run either on a
//! standalone connection or inside a caller-owned transaction; the
//! operations layer composes these inside one IMMEDIATE transaction per
//! request.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::reservation::{
    AssignmentStatus, Reservation, ReservationStatus, TableAssignment,
};
use crate::table::{ReservationId, TableId, TableType, TableUnit};

use super::connection::Database;

/// Storage format for reservation dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for arrival times.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Converts a UTC timestamp to Unix epoch seconds for database storage.
pub(crate) fn datetime_to_unix_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Converts Unix epoch seconds from the database to a UTC timestamp.
pub(crate) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(0, secs)
    })
}

fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn parse_time(s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a table unit from a database row.
///
/// Expects row fields in this order: id, `restaurant_id`, `table_type`, quantity
fn row_to_table_unit(row: &rusqlite::Row<'_>) -> rusqlite::Result<TableUnit> {
    let id: i64 = row.get(0)?;
    let restaurant_id: i64 = row.get(1)?;
    let type_str: String = row.get(2)?;
    let quantity: i64 = row.get(3)?;

    let table_type = TableType::try_from(type_str.as_str())
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(TableUnit::new(
        TableId::new(id),
        restaurant_id,
        table_type,
        quantity,
    ))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `restaurant_id`, `user_id`,
/// `guest_count`, date, `arrival_time`, `time_slot`, status, phone, note,
/// `created_at`
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let restaurant_id: i64 = row.get(1)?;
    let user_id: Option<i64> = row.get(2)?;
    let guest_count: i64 = row.get(3)?;
    let date: String = row.get(4)?;
    let arrival_time: String = row.get(5)?;
    // time_slot (column 6) is re-derived from the arrival time
    let status: String = row.get(7)?;
    let phone: Option<String> = row.get(8)?;
    let note: Option<String> = row.get(9)?;
    let created_secs: i64 = row.get(10)?;

    let status = ReservationStatus::from_db_str(&status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Reservation::builder(
        restaurant_id,
        guest_count,
        parse_date(&date)?,
        parse_time(&arrival_time)?,
    )
    .id(ReservationId::new(id))
    .user_id(user_id)
    .status(status)
    .phone(phone)
    .note(note)
    .created_at(unix_secs_to_datetime(created_secs)?)
    .build()
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a table assignment from a database row.
///
/// Expects row fields in this order: `reservation_id`, `table_id`, status,
/// `hold_expiration`
fn row_to_assignment(row: &rusqlite::Row<'_>) -> rusqlite::Result<TableAssignment> {
    let reservation_id: i64 = row.get(0)?;
    let table_id: i64 = row.get(1)?;
    let status: String = row.get(2)?;
    let expiration_secs: Option<i64> = row.get(3)?;

    let status = AssignmentStatus::from_db_str(&status)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let assignment = match (status, expiration_secs) {
        (AssignmentStatus::Holding, Some(secs)) => TableAssignment::holding(
            ReservationId::new(reservation_id),
            TableId::new(table_id),
            unix_secs_to_datetime(secs)?,
        ),
        (AssignmentStatus::Confirmed, None) => TableAssignment::confirmed(
            ReservationId::new(reservation_id),
            TableId::new(table_id),
        ),
        // hold_expiration is set iff status is HOLDING; any other shape
        // means the row was corrupted outside this library
        _ => {
            return Err(rusqlite::Error::ToSqlConversionFailure(Box::new(
                crate::reservation::ValidationError {
                    field: "hold_expiration".into(),
                    message: "hold_expiration must be set exactly while HOLDING".into(),
                },
            )))
        }
    };

    Ok(assignment)
}

// SQL statements for table inventory operations

const INSERT_TABLE_UNIT: &str = r"
    INSERT INTO tables (restaurant_id, table_type, quantity)
    VALUES (?1, ?2, ?3)
";

const SELECT_TABLE_UNITS: &str = r"
    SELECT id, restaurant_id, table_type, quantity
    FROM tables
    WHERE restaurant_id = ?1
    ORDER BY id
";

const UPDATE_TABLE_QUANTITY: &str = r"
    UPDATE tables SET quantity = ?2 WHERE id = ?1
";

const DELETE_RESTAURANT_TABLES: &str = r"
    DELETE FROM tables WHERE restaurant_id = ?1
";

// SQL statements for reservation operations

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (restaurant_id, user_id, guest_count, date, arrival_time, time_slot, status, phone, note, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
";

const SELECT_RESERVATION: &str = r"
    SELECT id, restaurant_id, user_id, guest_count, date, arrival_time,
           time_slot, status, phone, note, created_at
    FROM reservations
    WHERE id = ?1
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, restaurant_id, user_id, guest_count, date, arrival_time,
           time_slot, status, phone, note, created_at
    FROM reservations
    WHERE restaurant_id = ?1 AND date = ?2
    ORDER BY id
";

const CONFIRM_RESERVATION: &str = r"
    UPDATE reservations
    SET status = 'CONFIRMED', phone = ?2, note = ?3
    WHERE id = ?1
";

const CANCEL_RESERVATION: &str = r"
    UPDATE reservations SET status = 'CANCELLED' WHERE id = ?1
";

// SQL statements for assignment operations

const INSERT_HOLDING_ASSIGNMENT: &str = r"
    INSERT INTO reservation_tables (reservation_id, table_id, status, hold_expiration)
    VALUES (?1, ?2, 'HOLDING', ?3)
";

const COUNT_LIVE_HOLDINGS: &str = r"
    SELECT COUNT(*) FROM reservation_tables
    WHERE reservation_id = ?1 AND status = 'HOLDING' AND hold_expiration > ?2
";

const CONFIRM_ASSIGNMENTS: &str = r"
    UPDATE reservation_tables
    SET status = 'CONFIRMED', hold_expiration = NULL
    WHERE reservation_id = ?1 AND status = 'HOLDING'
";

const SELECT_EXPIRED_RESERVATION_IDS: &str = r"
    SELECT DISTINCT reservation_id FROM reservation_tables
    WHERE status = 'HOLDING' AND hold_expiration < ?1
    ORDER BY reservation_id
";

const DELETE_EXPIRED_HOLDINGS: &str = r"
    DELETE FROM reservation_tables
    WHERE reservation_id = ?1 AND status = 'HOLDING' AND hold_expiration < ?2
";

const COUNT_ASSIGNMENTS: &str = r"
    SELECT COUNT(*) FROM reservation_tables WHERE reservation_id = ?1
";

const DELETE_ASSIGNMENTS: &str = r"
    DELETE FROM reservation_tables WHERE reservation_id = ?1
";

const SELECT_ASSIGNMENTS: &str = r"
    SELECT reservation_id, table_id, status, hold_expiration
    FROM reservation_tables
    WHERE reservation_id = ?1
    ORDER BY id
";

const SELECT_ASSIGNED_TABLES: &str = r"
    SELECT t.id, t.table_type
    FROM reservation_tables rt
    JOIN tables t ON t.id = rt.table_id
    WHERE rt.reservation_id = ?1
    ORDER BY rt.id
";

const MIN_LIVE_EXPIRATION: &str = r"
    SELECT MIN(hold_expiration) FROM reservation_tables
    WHERE reservation_id = ?1 AND status = 'HOLDING'
";

impl Database {
    /// Creates a table inventory row and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_table_unit(
        conn: &Connection,
        restaurant_id: i64,
        table_type: TableType,
        quantity: i64,
    ) -> Result<TableId> {
        conn.execute(
            INSERT_TABLE_UNIT,
            params![restaurant_id, table_type.as_db_str(), quantity],
        )?;
        Ok(TableId::new(conn.last_insert_rowid()))
    }

    /// Lists all table inventory rows for a restaurant, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_table_units(conn: &Connection, restaurant_id: i64) -> Result<Vec<TableUnit>> {
        let mut stmt = conn.prepare(SELECT_TABLE_UNITS)?;
        let units = stmt
            .query_map(params![restaurant_id], row_to_table_unit)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(units)
    }

    /// Updates the physical unit count of a table row.
    ///
    /// Returns `true` if the row existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_table_unit_quantity(
        conn: &Connection,
        id: TableId,
        quantity: i64,
    ) -> Result<bool> {
        let changed = conn.execute(UPDATE_TABLE_QUANTITY, params![id.value(), quantity])?;
        Ok(changed > 0)
    }

    /// Deletes all table inventory rows of a restaurant.
    ///
    /// This is the restaurant-deletion cascade surface; reservations are
    /// never deleted with it.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_restaurant_tables(conn: &Connection, restaurant_id: i64) -> Result<usize> {
        Ok(conn.execute(DELETE_RESTAURANT_TABLES, params![restaurant_id])?)
    }

    /// Inserts a reservation row and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation(conn: &Connection, reservation: &Reservation) -> Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.restaurant_id(),
                reservation.user_id(),
                reservation.guest_count(),
                reservation.date().format(DATE_FORMAT).to_string(),
                reservation.arrival_time().format(TIME_FORMAT).to_string(),
                reservation.time_slot().as_db_str(),
                reservation.status().as_db_str(),
                reservation.phone(),
                reservation.note(),
                datetime_to_unix_secs(reservation.created_at()),
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_reservation(
        conn: &Connection,
        id: ReservationId,
    ) -> Result<Option<Reservation>> {
        let reservation = conn
            .query_row(SELECT_RESERVATION, params![id.value()], row_to_reservation)
            .optional()?;
        Ok(reservation)
    }

    /// Lists reservations for a restaurant on a given date, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        conn: &Connection,
        restaurant_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_RESERVATIONS)?;
        let reservations = stmt
            .query_map(
                params![restaurant_id, date.format(DATE_FORMAT).to_string()],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Marks a reservation CONFIRMED with the supplied contact fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn confirm_reservation(
        conn: &Connection,
        id: ReservationId,
        phone: &str,
        note: Option<&str>,
    ) -> Result<usize> {
        Ok(conn.execute(CONFIRM_RESERVATION, params![id.value(), phone, note])?)
    }

    /// Marks a reservation CANCELLED.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn cancel_reservation(conn: &Connection, id: ReservationId) -> Result<usize> {
        Ok(conn.execute(CANCEL_RESERVATION, params![id.value()])?)
    }

    /// Inserts one HOLDING assignment row per allocated table unit.
    ///
    /// Duplicate table ids in `table_ids` are intentional: each element
    /// consumes one distinct physical unit of that inventory row.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn insert_holding_assignments(
        conn: &Connection,
        reservation_id: ReservationId,
        table_ids: &[TableId],
        expires_at: DateTime<Utc>,
    ) -> Result<usize> {
        let mut stmt = conn.prepare(INSERT_HOLDING_ASSIGNMENT)?;
        for table_id in table_ids {
            stmt.execute(params![
                reservation_id.value(),
                table_id.value(),
                datetime_to_unix_secs(expires_at),
            ])?;
        }
        Ok(table_ids.len())
    }

    /// Counts HOLDING assignments whose expiration is still in the future.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_live_holdings(
        conn: &Connection,
        reservation_id: ReservationId,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let count = conn.query_row(
            COUNT_LIVE_HOLDINGS,
            params![reservation_id.value(), datetime_to_unix_secs(now)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Flips all HOLDING assignments of a reservation to CONFIRMED,
    /// clearing their expirations.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn confirm_assignments(conn: &Connection, reservation_id: ReservationId) -> Result<usize> {
        Ok(conn.execute(CONFIRM_ASSIGNMENTS, params![reservation_id.value()])?)
    }

    /// Finds distinct reservation ids that have at least one lapsed hold.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_with_expired_holds(
        conn: &Connection,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReservationId>> {
        let mut stmt = conn.prepare(SELECT_EXPIRED_RESERVATION_IDS)?;
        let ids = stmt
            .query_map(params![datetime_to_unix_secs(now)], |row| {
                let id: i64 = row.get(0)?;
                Ok(ReservationId::new(id))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    /// Deletes lapsed HOLDING assignments of a reservation.
    ///
    /// The expiry predicate is re-evaluated here, so an assignment
    /// confirmed (expiration cleared) between discovery and deletion is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_holdings(
        conn: &Connection,
        reservation_id: ReservationId,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        Ok(conn.execute(
            DELETE_EXPIRED_HOLDINGS,
            params![reservation_id.value(), datetime_to_unix_secs(now)],
        )?)
    }

    /// Counts all assignment rows of a reservation, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_assignments(conn: &Connection, reservation_id: ReservationId) -> Result<i64> {
        let count = conn.query_row(
            COUNT_ASSIGNMENTS,
            params![reservation_id.value()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Deletes all assignment rows of a reservation, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_assignments(conn: &Connection, reservation_id: ReservationId) -> Result<usize> {
        Ok(conn.execute(DELETE_ASSIGNMENTS, params![reservation_id.value()])?)
    }

    /// Lists the assignment rows of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_assignments(
        conn: &Connection,
        reservation_id: ReservationId,
    ) -> Result<Vec<TableAssignment>> {
        let mut stmt = conn.prepare(SELECT_ASSIGNMENTS)?;
        let assignments = stmt
            .query_map(params![reservation_id.value()], row_to_assignment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(assignments)
    }

    /// Lists the table units assigned to a reservation with their types.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assigned_tables(
        conn: &Connection,
        reservation_id: ReservationId,
    ) -> Result<Vec<(TableId, TableType)>> {
        let mut stmt = conn.prepare(SELECT_ASSIGNED_TABLES)?;
        let tables = stmt
            .query_map(params![reservation_id.value()], |row| {
                let id: i64 = row.get(0)?;
                let type_str: String = row.get(1)?;
                let table_type = TableType::try_from(type_str.as_str())
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                Ok((TableId::new(id), table_type))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tables)
    }

    /// Returns the earliest live hold expiration of a reservation, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn min_live_hold_expiration(
        conn: &Connection,
        reservation_id: ReservationId,
    ) -> Result<Option<DateTime<Utc>>> {
        let secs: Option<i64> = conn.query_row(
            MIN_LIVE_EXPIRATION,
            params![reservation_id.value()],
            |row| row.get(0),
        )?;
        match secs {
            Some(secs) => Ok(Some(unix_secs_to_datetime(secs)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use chrono::Duration;

    fn sample_reservation(restaurant_id: i64, guests: i64) -> Reservation {
        Reservation::builder(
            restaurant_id,
            guests,
            NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
        .phone(Some("555-0100".to_string()))
        .build()
        .unwrap()
    }

    #[test]
    fn test_create_and_list_table_units() {
        let db = create_test_database();

        let id1 = Database::create_table_unit(db.connection(), 1, TableType::Two, 3).unwrap();
        let id2 = Database::create_table_unit(db.connection(), 1, TableType::Six, 1).unwrap();
        Database::create_table_unit(db.connection(), 2, TableType::Four, 5).unwrap();

        let units = Database::list_table_units(db.connection(), 1).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].id(), id1);
        assert_eq!(units[0].table_type(), TableType::Two);
        assert_eq!(units[0].quantity(), 3);
        assert_eq!(units[1].id(), id2);
        assert_eq!(units[1].table_type(), TableType::Six);
    }

    #[test]
    fn test_update_table_unit_quantity() {
        let db = create_test_database();
        let id = Database::create_table_unit(db.connection(), 1, TableType::Four, 2).unwrap();

        assert!(Database::update_table_unit_quantity(db.connection(), id, 5).unwrap());
        let units = Database::list_table_units(db.connection(), 1).unwrap();
        assert_eq!(units[0].quantity(), 5);

        // Unknown row
        assert!(
            !Database::update_table_unit_quantity(db.connection(), TableId::new(999), 5).unwrap()
        );
    }

    #[test]
    fn test_delete_restaurant_tables() {
        let db = create_test_database();
        Database::create_table_unit(db.connection(), 1, TableType::Two, 1).unwrap();
        Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();
        Database::create_table_unit(db.connection(), 2, TableType::Six, 1).unwrap();

        let deleted = Database::delete_restaurant_tables(db.connection(), 1).unwrap();
        assert_eq!(deleted, 2);
        assert!(Database::list_table_units(db.connection(), 1)
            .unwrap()
            .is_empty());
        assert_eq!(Database::list_table_units(db.connection(), 2).unwrap().len(), 1);
    }

    #[test]
    fn test_insert_and_get_reservation() {
        let db = create_test_database();
        let reservation = sample_reservation(1, 4);

        let id = Database::insert_reservation(db.connection(), &reservation).unwrap();
        let fetched = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();

        assert_eq!(fetched.id(), Some(id));
        assert_eq!(fetched.restaurant_id(), 1);
        assert_eq!(fetched.guest_count(), 4);
        assert_eq!(fetched.status(), ReservationStatus::Pending);
        assert_eq!(fetched.phone(), Some("555-0100"));
    }

    #[test]
    fn test_get_reservation_missing() {
        let db = create_test_database();
        let fetched =
            Database::get_reservation(db.connection(), ReservationId::new(42)).unwrap();
        assert!(fetched.is_none());
    }

    #[test]
    fn test_list_reservations_filters_by_date() {
        let db = create_test_database();
        Database::insert_reservation(db.connection(), &sample_reservation(1, 2)).unwrap();
        Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        let other_day = Reservation::builder(
            1,
            2,
            NaiveDate::from_ymd_opt(2025, 7, 23).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
        .build()
        .unwrap();
        Database::insert_reservation(db.connection(), &other_day).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();
        let listed = Database::list_reservations(db.connection(), 1, date).unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn test_holding_assignment_round_trip() {
        let db = create_test_database();
        let table = Database::create_table_unit(db.connection(), 1, TableType::Four, 2).unwrap();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        let expires = Utc::now() + Duration::minutes(5);
        // Same table id twice: two physical units of one row
        Database::insert_holding_assignments(db.connection(), id, &[table, table], expires)
            .unwrap();

        let assignments = Database::list_assignments(db.connection(), id).unwrap();
        assert_eq!(assignments.len(), 2);
        assert!(assignments
            .iter()
            .all(|a| a.status() == AssignmentStatus::Holding));
        // Stored at second precision
        assert_eq!(
            assignments[0].hold_expiration().unwrap().timestamp(),
            expires.timestamp()
        );
    }

    #[test]
    fn test_count_live_holdings_respects_expiry() {
        let db = create_test_database();
        let table = Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        let now = Utc::now();
        Database::insert_holding_assignments(
            db.connection(),
            id,
            &[table],
            now + Duration::minutes(5),
        )
        .unwrap();

        assert_eq!(Database::count_live_holdings(db.connection(), id, now).unwrap(), 1);
        assert_eq!(
            Database::count_live_holdings(db.connection(), id, now + Duration::minutes(6))
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_confirm_assignments_clears_expiration() {
        let db = create_test_database();
        let table = Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        Database::insert_holding_assignments(
            db.connection(),
            id,
            &[table],
            Utc::now() + Duration::minutes(5),
        )
        .unwrap();

        let flipped = Database::confirm_assignments(db.connection(), id).unwrap();
        assert_eq!(flipped, 1);

        let assignments = Database::list_assignments(db.connection(), id).unwrap();
        assert_eq!(assignments[0].status(), AssignmentStatus::Confirmed);
        assert_eq!(assignments[0].hold_expiration(), None);
    }

    #[test]
    fn test_expired_hold_discovery_and_deletion() {
        let db = create_test_database();
        let table = Database::create_table_unit(db.connection(), 1, TableType::Four, 2).unwrap();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        let now = Utc::now();
        Database::insert_holding_assignments(
            db.connection(),
            id,
            &[table],
            now - Duration::minutes(1),
        )
        .unwrap();

        let expired = Database::reservations_with_expired_holds(db.connection(), now).unwrap();
        assert_eq!(expired, vec![id]);

        let deleted = Database::delete_expired_holdings(db.connection(), id, now).unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(Database::count_assignments(db.connection(), id).unwrap(), 0);

        // Second pass finds nothing
        let expired = Database::reservations_with_expired_holds(db.connection(), now).unwrap();
        assert!(expired.is_empty());
    }

    #[test]
    fn test_delete_expired_holdings_spares_live_rows() {
        let db = create_test_database();
        let table = Database::create_table_unit(db.connection(), 1, TableType::Four, 2).unwrap();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        let now = Utc::now();
        Database::insert_holding_assignments(
            db.connection(),
            id,
            &[table],
            now + Duration::minutes(5),
        )
        .unwrap();

        let deleted = Database::delete_expired_holdings(db.connection(), id, now).unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(Database::count_assignments(db.connection(), id).unwrap(), 1);
    }

    #[test]
    fn test_assigned_tables_and_min_expiration() {
        let db = create_test_database();
        let small = Database::create_table_unit(db.connection(), 1, TableType::Two, 1).unwrap();
        let large = Database::create_table_unit(db.connection(), 1, TableType::Six, 1).unwrap();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 8)).unwrap();

        let expires = Utc::now() + Duration::minutes(5);
        Database::insert_holding_assignments(db.connection(), id, &[large, small], expires)
            .unwrap();

        let tables = Database::assigned_tables(db.connection(), id).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0], (large, TableType::Six));
        assert_eq!(tables[1], (small, TableType::Two));

        let min = Database::min_live_hold_expiration(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(min.timestamp(), expires.timestamp());
    }

    #[test]
    fn test_min_expiration_none_without_holds() {
        let db = create_test_database();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();
        let min = Database::min_live_hold_expiration(db.connection(), id).unwrap();
        assert!(min.is_none());
    }

    #[test]
    fn test_cancel_reservation() {
        let db = create_test_database();
        let id = Database::insert_reservation(db.connection(), &sample_reservation(1, 4)).unwrap();

        Database::cancel_reservation(db.connection(), id).unwrap();
        let fetched = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status(), ReservationStatus::Cancelled);
    }
}
