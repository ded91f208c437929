//! Availability check: run the allocator without committing writes.

use chrono::{NaiveDate, NaiveTime};

use crate::allocator;
use crate::database::Database;
use crate::error::Result;
use crate::inventory::FreeInventory;
use crate::reservation::TimeSlot;
use crate::table::PartySize;

/// The availability check.
pub struct CheckAvailability;

impl CheckAvailability {
    /// Reports whether a party could hold tables right now.
    ///
    /// Runs the inventory view and the allocator against committed state
    /// without writing anything. Infeasible party sizes (zero, negative,
    /// over the ceiling, or no fitting combination) report `false`;
    /// only storage failures surface as errors.
    ///
    /// The answer is advisory: capacity may be consumed between this
    /// check and a subsequent hold, which then fails with its own
    /// infeasible error.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::{NaiveDate, NaiveTime};
    /// use tably::database::{Database, DatabaseConfig};
    /// use tably::operations::CheckAvailability;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
    /// let available = CheckAvailability::execute(
    ///     &db,
    ///     1,
    ///     NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
    ///     4,
    /// )
    /// .unwrap();
    /// println!("available: {available}");
    /// ```
    pub fn execute(
        db: &Database,
        restaurant_id: i64,
        date: NaiveDate,
        arrival_time: NaiveTime,
        guest_count: i64,
    ) -> Result<bool> {
        let Ok(party) = PartySize::try_from(guest_count) else {
            return Ok(false);
        };

        let time_slot = TimeSlot::from_arrival(arrival_time);
        let free = FreeInventory::load(db.connection(), restaurant_id, date, time_slot)?;

        Ok(allocator::allocate(&free, party).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::operations::hold::{HoldOperation, HoldOptions};
    use crate::table::TableType;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 22).unwrap()
    }

    fn lunch() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_availability_with_stock() {
        let db = create_test_database();
        Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();

        assert!(CheckAvailability::execute(&db, 1, date(), lunch(), 4).unwrap());
    }

    #[test]
    fn test_availability_without_stock() {
        let db = create_test_database();
        assert!(!CheckAvailability::execute(&db, 1, date(), lunch(), 2).unwrap());
    }

    #[test]
    fn test_availability_invalid_sizes_report_false() {
        let db = create_test_database();
        Database::create_table_unit(db.connection(), 1, TableType::Six, 10).unwrap();

        for guests in [0, -5, 21, 100] {
            assert!(
                !CheckAvailability::execute(&db, 1, date(), lunch(), guests).unwrap(),
                "party of {guests} must report unavailable"
            );
        }
    }

    #[test]
    fn test_availability_commits_no_writes() {
        let db = create_test_database();
        Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();

        CheckAvailability::execute(&db, 1, date(), lunch(), 4).unwrap();
        CheckAvailability::execute(&db, 1, date(), lunch(), 4).unwrap();

        // The same single table is still available to an actual hold
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM reservations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_availability_reflects_holds() {
        let mut db = create_test_database();
        Database::create_table_unit(db.connection(), 1, TableType::Four, 1).unwrap();

        assert!(CheckAvailability::execute(&db, 1, date(), lunch(), 4).unwrap());

        let options = HoldOptions::new(1, 4, date(), lunch(), "555-0100");
        HoldOperation::execute(&mut db, &options).unwrap();

        assert!(!CheckAvailability::execute(&db, 1, date(), lunch(), 4).unwrap());
    }
}
