//! Reservation types for tracking table bookings.
//!
//! This module provides the reservation domain model: time slots, status
//! machines, the reservation record itself, and the per-table assignment
//! rows that tie a reservation to physical table units.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::table::{ReservationId, TableId};

/// The service window a reservation occupies.
///
/// Time slots are derived from the arrival time, never stored
/// independently: arrivals before 15:00 are lunch, later arrivals are
/// dinner.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use tably::TimeSlot;
///
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(TimeSlot::from_arrival(noon), TimeSlot::Lunch);
///
/// let evening = NaiveTime::from_hms_opt(19, 30, 0).unwrap();
/// assert_eq!(TimeSlot::from_arrival(evening), TimeSlot::Dinner);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    /// The lunch service (arrival before 15:00).
    Lunch,
    /// The dinner service (arrival at or after 15:00).
    Dinner,
}

impl TimeSlot {
    /// Derives the time slot from an arrival time.
    #[must_use]
    pub fn from_arrival(arrival: NaiveTime) -> Self {
        if arrival.hour() < 15 {
            Self::Lunch
        } else {
            Self::Dinner
        }
    }

    /// Returns the database representation of this time slot.
    #[must_use]
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Lunch => "LUNCH",
            Self::Dinner => "DINNER",
        }
    }

    /// Parses a time slot from its database representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `LUNCH` or `DINNER`.
    pub fn from_db_str(s: &str) -> Result<Self, ValidationError> {
        match s {
            "LUNCH" => Ok(Self::Lunch),
            "DINNER" => Ok(Self::Dinner),
            _ => Err(ValidationError {
                field: "time_slot".into(),
                message: format!("unknown time slot '{s}'"),
            }),
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Lifecycle status of a reservation.
///
/// `Pending` (on hold) transitions to `Confirmed` via confirmation or to
/// `Cancelled` via the expiry reaper or an explicit cancel. `Confirmed`
/// and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Tables are held but the booking is not yet confirmed.
    Pending,
    /// The booking was confirmed; tables are permanently allocated.
    Confirmed,
    /// The booking was cancelled; no tables remain allocated.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the database representation of this status.
    #[must_use]
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its database representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known status.
    pub fn from_db_str(s: &str) -> Result<Self, ValidationError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status '{s}'"),
            }),
        }
    }

    /// Returns `true` for terminal statuses.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

/// Status of a single table assignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// The unit is held for a bounded time window.
    Holding,
    /// The unit is permanently allocated to the reservation.
    Confirmed,
}

impl AssignmentStatus {
    /// Returns the database representation of this status.
    #[must_use]
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Holding => "HOLDING",
            Self::Confirmed => "CONFIRMED",
        }
    }

    /// Parses a status from its database representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known status.
    pub fn from_db_str(s: &str) -> Result<Self, ValidationError> {
        match s {
            "HOLDING" => Ok(Self::Holding),
            "CONFIRMED" => Ok(Self::Confirmed),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown assignment status '{s}'"),
            }),
        }
    }
}

/// One party's booking at a restaurant.
///
/// Created in `Pending` status by the hold operation; promoted to
/// `Confirmed` or demoted to `Cancelled` later. Never hard-deleted.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use tably::{Reservation, TimeSlot};
///
/// let reservation = Reservation::builder(
///     1,
///     4,
///     NaiveDate::from_ymd_opt(2025, 7, 22).unwrap(),
///     NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
/// )
/// .phone(Some("555-0100".to_string()))
/// .build()
/// .unwrap();
///
/// assert_eq!(reservation.guest_count(), 4);
/// assert_eq!(reservation.time_slot(), TimeSlot::Lunch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    restaurant_id: i64,
    user_id: Option<i64>,
    guest_count: i64,
    date: NaiveDate,
    arrival_time: NaiveTime,
    time_slot: TimeSlot,
    status: ReservationStatus,
    phone: Option<String>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// The time slot is derived from the arrival time; status defaults to
    /// `Pending` and the creation timestamp to now.
    #[must_use]
    pub fn builder(
        restaurant_id: i64,
        guest_count: i64,
        date: NaiveDate,
        arrival_time: NaiveTime,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id: None,
            restaurant_id,
            user_id: None,
            guest_count,
            date,
            arrival_time,
            status: ReservationStatus::Pending,
            phone: None,
            note: None,
            created_at: None,
        }
    }

    /// Returns the reservation id, if the row has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Returns the restaurant this reservation belongs to.
    #[must_use]
    pub const fn restaurant_id(&self) -> i64 {
        self.restaurant_id
    }

    /// Returns the booking user, if known.
    ///
    /// Holds can be taken anonymously; the user is attached at
    /// confirmation time by the surrounding authentication layer.
    #[must_use]
    pub const fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    /// Returns the requested number of guests.
    ///
    /// This is the size the guest asked for, not the (possibly rounded)
    /// size used for table allocation.
    #[must_use]
    pub const fn guest_count(&self) -> i64 {
        self.guest_count
    }

    /// Returns the reservation date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the arrival time.
    #[must_use]
    pub const fn arrival_time(&self) -> NaiveTime {
        self.arrival_time
    }

    /// Returns the derived time slot.
    #[must_use]
    pub const fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the contact phone, if supplied.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the guest note, if supplied.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for creating [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: Option<ReservationId>,
    restaurant_id: i64,
    user_id: Option<i64>,
    guest_count: i64,
    date: NaiveDate,
    arrival_time: NaiveTime,
    status: ReservationStatus,
    phone: Option<String>,
    note: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the persisted row id.
    #[must_use]
    pub const fn id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the booking user.
    #[must_use]
    pub const fn user_id(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the contact phone. The value is trimmed of whitespace.
    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone.map(|p| p.trim().to_string());
        self
    }

    /// Sets the guest note. The value is trimmed of whitespace.
    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = note.map(|n| n.trim().to_string());
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The guest count is not positive
    /// - The phone is provided but empty after trimming
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.guest_count < 1 {
            return Err(ValidationError {
                field: "guest_count".into(),
                message: "guest count must be at least 1".into(),
            });
        }

        if let Some(ref phone) = self.phone {
            if phone.is_empty() {
                return Err(ValidationError {
                    field: "phone".into(),
                    message: "phone must be non-empty after trimming whitespace".into(),
                });
            }
        }

        Ok(Reservation {
            id: self.id,
            restaurant_id: self.restaurant_id,
            user_id: self.user_id,
            guest_count: self.guest_count,
            date: self.date,
            arrival_time: self.arrival_time,
            time_slot: TimeSlot::from_arrival(self.arrival_time),
            status: self.status,
            phone: self.phone,
            note: self.note,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// A reservation-to-table join row: one physical table unit consumed by a
/// reservation.
///
/// Invariant: `hold_expiration` is set if and only if the status is
/// `Holding`. The constructor enforces this.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use tably::{AssignmentStatus, ReservationId, TableAssignment, TableId};
///
/// let expires = Utc::now();
/// let assignment = TableAssignment::holding(
///     ReservationId::new(1),
///     TableId::new(5),
///     expires,
/// );
/// assert_eq!(assignment.status(), AssignmentStatus::Holding);
/// assert_eq!(assignment.hold_expiration(), Some(expires));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAssignment {
    reservation_id: ReservationId,
    table_id: TableId,
    status: AssignmentStatus,
    hold_expiration: Option<DateTime<Utc>>,
}

impl TableAssignment {
    /// Creates a holding assignment with the given expiration.
    #[must_use]
    pub const fn holding(
        reservation_id: ReservationId,
        table_id: TableId,
        hold_expiration: DateTime<Utc>,
    ) -> Self {
        Self {
            reservation_id,
            table_id,
            status: AssignmentStatus::Holding,
            hold_expiration: Some(hold_expiration),
        }
    }

    /// Creates a confirmed assignment (no expiration).
    #[must_use]
    pub const fn confirmed(reservation_id: ReservationId, table_id: TableId) -> Self {
        Self {
            reservation_id,
            table_id,
            status: AssignmentStatus::Confirmed,
            hold_expiration: None,
        }
    }

    /// Returns the owning reservation id.
    #[must_use]
    pub const fn reservation_id(&self) -> ReservationId {
        self.reservation_id
    }

    /// Returns the consumed table unit.
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Returns the assignment status.
    #[must_use]
    pub const fn status(&self) -> AssignmentStatus {
        self.status
    }

    /// Returns the hold expiration, present only while holding.
    #[must_use]
    pub const fn hold_expiration(&self) -> Option<DateTime<Utc>> {
        self.hold_expiration
    }

    /// Checks whether a holding assignment has lapsed at the given instant.
    ///
    /// Confirmed assignments never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.hold_expiration {
            Some(expiry) => expiry < now,
            None => false,
        }
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
