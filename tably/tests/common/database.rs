//! Database helpers for integration tests.

use std::path::PathBuf;

use tably::{Database, DatabaseConfig, ReservationId, TableType};

/// Creates a test database in a temporary location, returning both the
/// open handle and the file path so further connections can be opened
/// against the same file.
#[allow(dead_code)]
pub fn create_test_database() -> (Database, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(&path)).unwrap();

    // Keep the temp directory alive for the rest of the process
    std::mem::forget(dir);

    (db, path)
}

/// Opens another connection to an existing test database file.
#[allow(dead_code)]
pub fn open_again(path: &PathBuf) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Seeds table inventory: `(table_type, quantity)` rows for restaurant 1.
#[allow(dead_code)]
pub fn seed_tables(db: &Database, rows: &[(TableType, i64)]) {
    for &(table_type, quantity) in rows {
        Database::create_table_unit(db.connection(), 1, table_type, quantity).unwrap();
    }
}

/// Rewrites a reservation's hold expirations `seconds` into the past,
/// simulating the passage of time.
#[allow(dead_code)]
pub fn backdate_hold(db: &Database, id: ReservationId, seconds: i64) {
    db.connection()
        .execute(
            "UPDATE reservation_tables SET hold_expiration = hold_expiration - ?2
             WHERE reservation_id = ?1",
            [id.value(), seconds],
        )
        .unwrap();
}
