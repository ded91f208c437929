//! Hold operation: allocate tables and reserve them for a bounded window.
//!
//! A hold runs as one IMMEDIATE transaction: read the free inventory,
//! pick the units, insert the PENDING reservation and its HOLDING
//! assignment rows, commit. On an infeasible allocation the transaction
//! rolls back and nothing is written.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::allocator;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::inventory::FreeInventory;
use crate::reservation::Reservation;
use crate::table::{PartySize, ReservationId};

/// How long a hold keeps its table units before lapsing, in minutes.
///
/// Fixed operational constant, not per-request configurable. Expiry is
/// enforced purely by comparing the stored timestamp; no in-process timer
/// carries hold state, so reaping resumes from persisted state alone
/// after a restart.
pub const HOLD_DURATION_MINUTES: i64 = 5;

/// Options for a hold operation.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use tably::operations::HoldOptions;
///
/// let options = HoldOptions::new(
///     1,
///     4,
///     NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
///     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
///     "555-0100",
/// )
/// .with_note(Some("window seat".to_string()));
/// assert_eq!(options.guest_count, 4);
/// ```
#[derive(Debug, Clone)]
pub struct HoldOptions {
    /// The restaurant to book at.
    pub restaurant_id: i64,

    /// The booking user, if authenticated.
    pub user_id: Option<i64>,

    /// The requested number of guests.
    pub guest_count: i64,

    /// The reservation date.
    pub date: NaiveDate,

    /// The arrival time; determines the lunch/dinner slot.
    pub arrival_time: NaiveTime,

    /// Contact phone for the hold.
    pub phone: String,

    /// Optional guest note.
    pub note: Option<String>,
}

impl HoldOptions {
    /// Creates hold options with the required fields.
    #[must_use]
    pub fn new(
        restaurant_id: i64,
        guest_count: i64,
        date: NaiveDate,
        arrival_time: NaiveTime,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id,
            user_id: None,
            guest_count,
            date,
            arrival_time,
            phone: phone.into(),
            note: None,
        }
    }

    /// Sets the booking user.
    #[must_use]
    pub const fn with_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the guest note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// Outcome of a successful hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldOutcome {
    /// The hold identifier (the reservation id).
    pub hold_id: ReservationId,

    /// When the hold lapses unless confirmed.
    pub expires_at: DateTime<Utc>,

    /// Number of table units held.
    pub table_count: usize,
}

/// The hold operation.
pub struct HoldOperation;

impl HoldOperation {
    /// Creates a time-bounded hold for a party.
    ///
    /// All steps run inside one IMMEDIATE transaction: the time slot is
    /// derived from the arrival time, the free inventory is read, the
    /// allocator picks units, and the reservation plus one HOLDING
    /// assignment row per unit are inserted with an expiry of now plus
    /// [`HOLD_DURATION_MINUTES`]. The held capacity is visible to every
    /// subsequent inventory read the moment the transaction commits.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPartySize`] if the guest count is outside 1-20
    /// - [`Error::TablesUnavailable`] if no feasible assignment exists
    ///   (the transaction rolls back; no partial writes remain)
    /// - [`Error::Database`] on storage failures
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::{NaiveDate, NaiveTime};
    /// use tably::database::{Database, DatabaseConfig};
    /// use tably::operations::{HoldOperation, HoldOptions};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/tably.db")).unwrap();
    /// let options = HoldOptions::new(
    ///     1,
    ///     4,
    ///     NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
    ///     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
    ///     "555-0100",
    /// );
    /// let outcome = HoldOperation::execute(&mut db, &options).unwrap();
    /// println!("hold {} expires {}", outcome.hold_id, outcome.expires_at);
    /// ```
    pub fn execute(db: &mut Database, options: &HoldOptions) -> Result<HoldOutcome> {
        let party = PartySize::try_from(options.guest_count)?;

        let reservation = Reservation::builder(
            options.restaurant_id,
            options.guest_count,
            options.date,
            options.arrival_time,
        )
        .user_id(options.user_id)
        .phone(Some(options.phone.clone()))
        .note(options.note.clone())
        .build()?;

        let now = Utc::now();
        let expires_at = now + Duration::minutes(HOLD_DURATION_MINUTES);

        let tx = db.begin_transaction()?;

        let free = FreeInventory::load(
            &tx,
            options.restaurant_id,
            options.date,
            reservation.time_slot(),
        )?;

        let Some(units) = allocator::allocate(&free, party) else {
            // Dropping the transaction rolls it back; nothing was written.
            return Err(Error::TablesUnavailable {
                guest_count: options.guest_count,
            });
        };

        let hold_id = Database::insert_reservation(&tx, &reservation)?;
        let table_count = Database::insert_holding_assignments(&tx, hold_id, &units, expires_at)?;

        tx.commit()?;

        log::debug!(
            "held {table_count} table unit(s) for party of {} as reservation {hold_id}",
            options.guest_count
        );

        Ok(HoldOutcome {
            hold_id,
            expires_at,
            table_count,
        })
    }
}
