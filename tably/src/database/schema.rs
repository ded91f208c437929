//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the tably reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the tables table.
///
/// Each row describes `quantity` identical physical table units of one
/// capacity category at one restaurant. The capacity category is stored
/// as the short numeric-string enum '2', '4', or '6'.
pub const CREATE_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL,
        table_type TEXT NOT NULL CHECK (table_type IN ('2', '4', '6')),
        quantity INTEGER NOT NULL CHECK (quantity > 0)
    )";

/// SQL statement to create the reservations table.
///
/// Reservations are created in PENDING status by the hold operation and
/// never hard-deleted; terminal transitions flip the status column.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL,
        user_id INTEGER,
        guest_count INTEGER NOT NULL,
        date TEXT NOT NULL,
        arrival_time TEXT NOT NULL,
        time_slot TEXT NOT NULL CHECK (time_slot IN ('LUNCH', 'DINNER')),
        status TEXT NOT NULL DEFAULT 'PENDING'
            CHECK (status IN ('PENDING', 'CONFIRMED', 'CANCELLED')),
        phone TEXT,
        note TEXT,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservation-to-table join table.
///
/// One row per physical table unit consumed by a reservation.
/// `hold_expiration` is non-NULL exactly while the row is HOLDING.
pub const CREATE_RESERVATION_TABLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservation_tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        reservation_id INTEGER NOT NULL REFERENCES reservations(id),
        table_id INTEGER NOT NULL REFERENCES tables(id),
        status TEXT NOT NULL CHECK (status IN ('HOLDING', 'CONFIRMED')),
        hold_expiration INTEGER
    )";

/// SQL statement to create an index on the tables restaurant column.
///
/// This index speeds up inventory queries per restaurant.
pub const CREATE_TABLES_RESTAURANT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tables_restaurant ON tables(restaurant_id)";

/// SQL statement to create an index on the assignment reservation column.
///
/// This index speeds up per-reservation assignment lookups during
/// confirmation and reaping.
pub const CREATE_ASSIGNMENT_RESERVATION_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservation_tables_reservation
    ON reservation_tables(reservation_id)";

/// SQL statement to create an index on the assignment table column.
///
/// This index speeds up the reserved-count computation of the inventory
/// view.
pub const CREATE_ASSIGNMENT_TABLE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservation_tables_table
    ON reservation_tables(table_id)";

/// SQL statement to create an index on assignment status and expiration.
///
/// This index speeds up expiry sweeps that search for lapsed holds.
pub const CREATE_ASSIGNMENT_EXPIRY_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservation_tables_expiry
    ON reservation_tables(status, hold_expiration)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
