//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the tably library.

pub mod database;

use chrono::{NaiveDate, NaiveTime};
use tably::HoldOptions;

/// The date every fixture books on.
#[allow(dead_code)]
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 22).unwrap()
}

/// A lunch arrival time.
#[allow(dead_code)]
pub fn lunch_arrival() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

/// A dinner arrival time.
#[allow(dead_code)]
pub fn dinner_arrival() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 0, 0).unwrap()
}

/// Builder for hold options with sensible defaults.
///
/// Defaults: restaurant 1, lunch arrival on the fixture date, phone
/// "555-0100", no user, no note.
#[allow(dead_code)]
pub struct HoldFixture {
    restaurant_id: i64,
    guest_count: i64,
    arrival: NaiveTime,
    user_id: Option<i64>,
    note: Option<String>,
}

#[allow(dead_code)]
impl HoldFixture {
    /// Creates a fixture for a party of the given size.
    pub fn party(guest_count: i64) -> Self {
        Self {
            restaurant_id: 1,
            guest_count,
            arrival: lunch_arrival(),
            user_id: None,
            note: None,
        }
    }

    /// Sets the restaurant.
    pub fn at_restaurant(mut self, restaurant_id: i64) -> Self {
        self.restaurant_id = restaurant_id;
        self
    }

    /// Sets the arrival time.
    pub fn arriving_at(mut self, arrival: NaiveTime) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the booking user.
    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Builds the hold options.
    pub fn build(self) -> HoldOptions {
        HoldOptions::new(
            self.restaurant_id,
            self.guest_count,
            test_date(),
            self.arrival,
            "555-0100",
        )
        .with_user(self.user_id)
        .with_note(self.note)
    }
}
