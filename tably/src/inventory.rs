//! Free-table inventory view.
//!
//! This module computes, for one restaurant, date, and time slot, the
//! physical table units that are currently free: not consumed by any
//! HOLDING or CONFIRMED assignment whose reservation shares the same date
//! and time slot.
//!
//! The view is a pure read. It must be loaded on the same connection (and
//! inside the same transaction) as any subsequent hold write, otherwise
//! two concurrent holds can both observe the same free unit.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::reservation::TimeSlot;
use crate::table::{TableId, TableType};

/// Free-units query.
///
/// For each inventory row of the restaurant, a correlated count of
/// assignment rows in {HOLDING, CONFIRMED} joined to a reservation with
/// the same date and time slot. Rows with nothing free are filtered out
/// by the caller; `ORDER BY t.id` keeps the view deterministic.
const SELECT_FREE_COUNTS: &str = r"
    SELECT t.id, t.table_type, t.quantity,
           (SELECT COUNT(*)
            FROM reservation_tables rt
            JOIN reservations r ON r.id = rt.reservation_id
            WHERE rt.table_id = t.id
              AND rt.status IN ('HOLDING', 'CONFIRMED')
              AND r.date = ?2
              AND r.time_slot = ?3) AS reserved_count
    FROM tables t
    WHERE t.restaurant_id = ?1
    ORDER BY t.id
";

/// Storage format for reservation dates (matches the database layer).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The free table units of one restaurant for one date and time slot.
///
/// Units are grouped by capacity category. A `tables` row with quantity 3
/// and one consumed unit contributes its id twice: each occurrence stands
/// for one free physical unit. Within a category, ids are ascending.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use tably::database::{Database, DatabaseConfig};
/// use tably::{FreeInventory, TimeSlot};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();
/// let free = FreeInventory::load(db.connection(), 1, date, TimeSlot::Lunch).unwrap();
/// println!("{} free units, {} free seats", free.unit_count(), free.total_seats());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeInventory {
    units: BTreeMap<TableType, Vec<TableId>>,
}

impl FreeInventory {
    /// Loads the free units for a restaurant, date, and time slot.
    ///
    /// Idempotent: two loads with no intervening writes return identical
    /// inventories.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored table type cannot
    /// be decoded.
    pub fn load(
        conn: &Connection,
        restaurant_id: i64,
        date: NaiveDate,
        time_slot: TimeSlot,
    ) -> Result<Self> {
        let mut stmt = conn.prepare(SELECT_FREE_COUNTS)?;
        let rows = stmt.query_map(
            params![
                restaurant_id,
                date.format(DATE_FORMAT).to_string(),
                time_slot.as_db_str()
            ],
            |row| {
                let id: i64 = row.get(0)?;
                let type_str: String = row.get(1)?;
                let quantity: i64 = row.get(2)?;
                let reserved: i64 = row.get(3)?;
                Ok((id, type_str, quantity - reserved))
            },
        )?;

        let mut units: BTreeMap<TableType, Vec<TableId>> = BTreeMap::new();
        for row in rows {
            let (id, type_str, available) = row?;
            if available <= 0 {
                continue;
            }
            let table_type = TableType::try_from(type_str.as_str())
                .map_err(crate::error::Error::from)?;
            let entry = units.entry(table_type).or_default();
            for _ in 0..available {
                entry.push(TableId::new(id));
            }
        }

        Ok(Self { units })
    }

    /// Builds an inventory from explicit per-type unit lists.
    ///
    /// Primarily useful for exercising the allocator without a database.
    #[must_use]
    pub fn from_units(units: BTreeMap<TableType, Vec<TableId>>) -> Self {
        let mut units = units;
        for ids in units.values_mut() {
            ids.sort_unstable();
        }
        units.retain(|_, ids| !ids.is_empty());
        Self { units }
    }

    /// Returns the free unit ids of one capacity category, ascending.
    #[must_use]
    pub fn units_of(&self, table_type: TableType) -> &[TableId] {
        self.units.get(&table_type).map_or(&[], Vec::as_slice)
    }

    /// Returns the total number of free physical units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }

    /// Returns the total free seating capacity.
    #[must_use]
    pub fn total_seats(&self) -> i64 {
        self.units
            .iter()
            .map(|(t, ids)| t.seats() * ids.len() as i64)
            .sum()
    }

    /// Returns `true` if no units are free.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterates categories largest-first with their free unit lists.
    pub(crate) fn largest_first(&self) -> impl Iterator<Item = (TableType, &[TableId])> {
        self.units
            .iter()
            .rev()
            .map(|(t, ids)| (*t, ids.as_slice()))
    }

    /// Returns a mutable working copy the allocator can consume from.
    pub(crate) fn to_working_set(&self) -> BTreeMap<TableType, Vec<TableId>> {
        self.units.clone()
    }
}
