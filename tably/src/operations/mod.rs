//! Reservation engine operations.
//!
//! Each operation owns one IMMEDIATE transaction: it reads and writes
//! against a single consistent snapshot and either commits fully or
//! leaves no trace. Allocation decisions always re-read committed state;
//! nothing is cached in memory between requests.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, NaiveTime};
//! use tably::database::{Database, DatabaseConfig};
//! use tably::operations::{ConfirmOperation, ConfirmOptions, HoldOperation, HoldOptions};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
//!
//! // Take a hold...
//! let options = HoldOptions::new(
//!     1,
//!     4,
//!     NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
//!     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
//!     "555-0100",
//! );
//! let outcome = HoldOperation::execute(&mut db, &options).unwrap();
//!
//! // ...then confirm it before the expiry lapses
//! let confirm = ConfirmOptions::new(outcome.hold_id, "555-0100");
//! ConfirmOperation::execute(&mut db, &confirm).unwrap();
//! ```

pub mod availability;
pub mod cancel;
pub mod confirm;
pub mod detail;
pub mod hold;
pub mod reap;

#[cfg(test)]
mod proptests;

pub use availability::CheckAvailability;
pub use cancel::{CancelOperation, CancelOptions, CancelOutcome};
pub use confirm::{ConfirmOperation, ConfirmOptions, ConfirmOutcome};
pub use detail::ReservationDetail;
pub use hold::{HoldOperation, HoldOptions, HoldOutcome, HOLD_DURATION_MINUTES};
pub use reap::{ReapOperations, ReapResult};
