//! Error types for the tably library.
//!
//! This module provides a comprehensive error hierarchy for all operations
//! in the tably library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a tably error.
///
/// # Examples
///
/// ```
/// use tably::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tably library.
///
/// This enum encompasses all possible error conditions that can occur
/// during table reservation operations. The three user-visible classes
/// map onto dedicated variants: no feasible table assignment is
/// [`Error::TablesUnavailable`], a lapsed or unknown hold is
/// [`Error::HoldExpired`], and storage failures surface as
/// [`Error::Database`] or [`Error::Io`].
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid party size was provided.
    #[error("invalid party size {value}: {reason}")]
    InvalidPartySize {
        /// The invalid party size value.
        value: i64,
        /// The reason the party size is invalid.
        reason: String,
    },

    /// An invalid table type was provided.
    #[error("invalid table type '{value}': expected one of '2', '4', '6'")]
    InvalidTableType {
        /// The invalid table type value.
        value: String,
    },

    /// No table assignment exists that seats the requested party.
    ///
    /// This is a user-correctable condition: the guest can retry with a
    /// different date, time slot, or party size.
    #[error("no tables available for a party of {guest_count}")]
    TablesUnavailable {
        /// The requested guest count.
        guest_count: i64,
    },

    /// The hold has lapsed, was already confirmed, or never existed.
    ///
    /// The guest must restart the hold flow.
    #[error("hold expired or invalid for reservation {reservation_id}")]
    HoldExpired {
        /// The reservation id whose hold was not live.
        reservation_id: i64,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

// Additional conversions for better ergonomics

impl From<crate::table::InvalidPartySizeError> for Error {
    fn from(err: crate::table::InvalidPartySizeError) -> Self {
        Self::InvalidPartySize {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::table::InvalidTableTypeError> for Error {
    fn from(err: crate::table::InvalidTableTypeError) -> Self {
        Self::InvalidTableType { value: err.value }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates an infeasible allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tably::Error;
    ///
    /// let err = Error::TablesUnavailable { guest_count: 12 };
    /// assert!(err.is_infeasible());
    /// ```
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::TablesUnavailable { .. } | Self::InvalidPartySize { .. }
        )
    }

    /// Check if error indicates a lapsed or invalid hold.
    ///
    /// # Examples
    ///
    /// ```
    /// use tably::Error;
    ///
    /// let err = Error::HoldExpired { reservation_id: 7 };
    /// assert!(err.is_hold_expired());
    /// ```
    #[must_use]
    pub fn is_hold_expired(&self) -> bool {
        matches!(self, Self::HoldExpired { .. })
    }

    /// Check if error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use tably::Error;
    ///
    /// let err = Error::NotFound { resource: "reservation 9".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
