#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # tably
//!
//! A library for managing restaurant table reservations and holds.
//!
//! This library provides the table-allocation and hold-lifecycle engine:
//! given a party size and a restaurant's physical table inventory, it
//! decides whether an assignment exists, picks a policy-optimal one,
//! holds the tables for a bounded window, atomically promotes the hold
//! to a confirmed booking, and reclaims tables whose holds lapsed.
//!
//! ## Core Types
//!
//! - [`TableType`], [`TableUnit`], [`PartySize`]: physical inventory and
//!   party validation
//! - [`Reservation`], [`TableAssignment`], [`TimeSlot`]: the booking model
//! - [`FreeInventory`] and [`allocator::allocate`]: the packing engine
//! - [`Reaper`]: background release of expired holds
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use tably::{PartySize, TableType};
//!
//! // Validate a party size
//! let party = PartySize::try_from(11).unwrap();
//! assert_eq!(party.value(), 11);
//! // Odd parties of 10+ allocate as the next even size
//! assert_eq!(party.effective(), 12);
//!
//! // Table capacities form a fixed, closed set
//! assert_eq!(TableType::Six.seats(), 6);
//! ```

pub mod allocator;
pub mod config;
pub mod database;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod operations;
pub mod reaper;
pub mod reservation;
pub mod table;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use inventory::FreeInventory;
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    CancelOperation, CancelOptions, CancelOutcome, CheckAvailability, ConfirmOperation,
    ConfirmOptions, ConfirmOutcome, HoldOperation, HoldOptions, HoldOutcome, ReapOperations,
    ReapResult, ReservationDetail, HOLD_DURATION_MINUTES,
};
pub use reaper::{Reaper, DEFAULT_REAP_INTERVAL};
pub use reservation::{
    AssignmentStatus, Reservation, ReservationStatus, TableAssignment, TimeSlot,
};
pub use table::{PartySize, ReservationId, TableId, TableType, TableUnit};
