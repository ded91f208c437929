//! Table and party-size types for the reservation engine.
//!
//! This module provides the core physical-inventory types: table capacity
//! categories, party sizes with their validation rules, and the identifier
//! newtypes used throughout the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical table capacity category.
///
/// Restaurants stock tables in exactly three sizes: 2, 4, and 6 seats.
/// The set is fixed and closed; the database stores the category as the
/// short numeric string `'2'`, `'4'`, or `'6'`.
///
/// The derived ordering follows capacity (`Two < Four < Six`), which the
/// allocator relies on for its largest-first tie-breaking.
///
/// # Examples
///
/// ```
/// use tably::TableType;
///
/// let t = TableType::try_from("4").unwrap();
/// assert_eq!(t.seats(), 4);
/// assert_eq!(t.as_db_str(), "4");
/// assert!(TableType::Two < TableType::Six);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TableType {
    /// A two-seat table.
    Two,
    /// A four-seat table.
    Four,
    /// A six-seat table.
    Six,
}

impl TableType {
    /// All table types, ordered smallest to largest.
    pub const ALL: [Self; 3] = [Self::Two, Self::Four, Self::Six];

    /// Returns the number of seats at this table type.
    #[must_use]
    pub const fn seats(self) -> i64 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Six => 6,
        }
    }

    /// Returns the database representation of this table type.
    #[must_use]
    pub const fn as_db_str(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Four => "4",
            Self::Six => "6",
        }
    }

    /// Returns the larger table types that may substitute for this one.
    ///
    /// A shortfall of 2-seat tables may be filled by 4-seat, then 6-seat
    /// units; a shortfall of 4-seat tables by 6-seat units only; 6-seat
    /// tables have no substitute.
    ///
    /// # Examples
    ///
    /// ```
    /// use tably::TableType;
    ///
    /// assert_eq!(TableType::Two.upgrades(), &[TableType::Four, TableType::Six]);
    /// assert_eq!(TableType::Four.upgrades(), &[TableType::Six]);
    /// assert!(TableType::Six.upgrades().is_empty());
    /// ```
    #[must_use]
    pub const fn upgrades(self) -> &'static [Self] {
        match self {
            Self::Two => &[Self::Four, Self::Six],
            Self::Four => &[Self::Six],
            Self::Six => &[],
        }
    }
}

impl TryFrom<&str> for TableType {
    type Error = InvalidTableTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "2" => Ok(Self::Two),
            "4" => Ok(Self::Four),
            "6" => Ok(Self::Six),
            _ => Err(InvalidTableTypeError {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-seat", self.seats())
    }
}

/// Error type for invalid table type strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTableTypeError {
    /// The invalid table type value.
    pub value: String,
}

impl fmt::Display for InvalidTableTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid table type '{}': expected one of '2', '4', '6'",
            self.value
        )
    }
}

impl std::error::Error for InvalidTableTypeError {}

/// A validated party size (1-20 guests).
///
/// A single reservation cannot span unlimited tables; 20 guests is the
/// hard operational ceiling.
///
/// # Examples
///
/// ```
/// use tably::PartySize;
///
/// let party = PartySize::try_from(4).unwrap();
/// assert_eq!(party.value(), 4);
///
/// // Out of range
/// assert!(PartySize::try_from(0).is_err());
/// assert!(PartySize::try_from(21).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartySize(i64);

impl PartySize {
    /// The minimum valid party size.
    pub const MIN: i64 = 1;

    /// The maximum valid party size.
    pub const MAX: i64 = 20;

    /// Returns the requested number of guests.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns the party size used for table allocation.
    ///
    /// Business rule: parties of 10 or more with an odd size are rounded
    /// up to the next even number, since even-sized table combinations
    /// seat odd parties only with one extra empty seat. The stored guest
    /// count keeps the requested size; only the allocation width changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use tably::PartySize;
    ///
    /// assert_eq!(PartySize::try_from(7).unwrap().effective(), 7);
    /// assert_eq!(PartySize::try_from(11).unwrap().effective(), 12);
    /// assert_eq!(PartySize::try_from(12).unwrap().effective(), 12);
    /// ```
    #[must_use]
    pub const fn effective(self) -> i64 {
        if self.0 >= 10 && self.0 % 2 == 1 {
            self.0 + 1
        } else {
            self.0
        }
    }
}

impl TryFrom<i64> for PartySize {
    type Error = InvalidPartySizeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < Self::MIN {
            Err(InvalidPartySizeError {
                value,
                reason: "party size must be at least 1".into(),
            })
        } else if value > Self::MAX {
            Err(InvalidPartySizeError {
                value,
                reason: format!("party size must not exceed {}", Self::MAX),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid party sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPartySizeError {
    /// The invalid party size value.
    pub value: i64,
    /// The reason the party size is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidPartySizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid party size {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidPartySizeError {}

/// Identifier of a table inventory row.
///
/// One row describes `quantity` identical physical units, so the same
/// `TableId` may appear more than once in an allocation: each occurrence
/// consumes one distinct physical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(i64);

impl TableId {
    /// Creates a table id from a raw database rowid.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying rowid.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a reservation. Doubles as the hold id returned to guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a reservation id from a raw database rowid.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying rowid.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A table inventory row: `quantity` identical physical tables of one
/// capacity category at one restaurant.
///
/// Created at restaurant onboarding, mutated on profile edits, and removed
/// only when the restaurant itself is deleted.
///
/// # Examples
///
/// ```
/// use tably::{TableId, TableType, TableUnit};
///
/// let unit = TableUnit::new(TableId::new(1), 10, TableType::Four, 3);
/// assert_eq!(unit.table_type(), TableType::Four);
/// assert_eq!(unit.quantity(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableUnit {
    id: TableId,
    restaurant_id: i64,
    table_type: TableType,
    quantity: i64,
}

impl TableUnit {
    /// Creates a new table unit row.
    #[must_use]
    pub const fn new(id: TableId, restaurant_id: i64, table_type: TableType, quantity: i64) -> Self {
        Self {
            id,
            restaurant_id,
            table_type,
            quantity,
        }
    }

    /// Returns the row identifier.
    #[must_use]
    pub const fn id(&self) -> TableId {
        self.id
    }

    /// Returns the owning restaurant id.
    #[must_use]
    pub const fn restaurant_id(&self) -> i64 {
        self.restaurant_id
    }

    /// Returns the capacity category of these units.
    #[must_use]
    pub const fn table_type(&self) -> TableType {
        self.table_type
    }

    /// Returns the number of identical physical units in this row.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_type_seats() {
        assert_eq!(TableType::Two.seats(), 2);
        assert_eq!(TableType::Four.seats(), 4);
        assert_eq!(TableType::Six.seats(), 6);
    }

    #[test]
    fn test_table_type_db_round_trip() {
        for t in TableType::ALL {
            assert_eq!(TableType::try_from(t.as_db_str()).unwrap(), t);
        }
    }

    #[test]
    fn test_table_type_invalid() {
        let err = TableType::try_from("8").unwrap_err();
        assert_eq!(err.value, "8");
        assert!(format!("{err}").contains("invalid table type"));
    }

    #[test]
    fn test_table_type_ordering() {
        assert!(TableType::Two < TableType::Four);
        assert!(TableType::Four < TableType::Six);
    }

    #[test]
    fn test_table_type_upgrades() {
        assert_eq!(
            TableType::Two.upgrades(),
            &[TableType::Four, TableType::Six]
        );
        assert_eq!(TableType::Four.upgrades(), &[TableType::Six]);
        assert!(TableType::Six.upgrades().is_empty());
    }

    #[test]
    fn test_party_size_valid_range() {
        for n in 1..=20 {
            let party = PartySize::try_from(n).unwrap();
            assert_eq!(party.value(), n);
        }
    }

    #[test]
    fn test_party_size_rejects_zero_and_negative() {
        assert!(PartySize::try_from(0).is_err());
        assert!(PartySize::try_from(-3).is_err());
    }

    #[test]
    fn test_party_size_rejects_over_ceiling() {
        let err = PartySize::try_from(21).unwrap_err();
        assert_eq!(err.value, 21);
        assert!(err.reason.contains("20"));
    }

    #[test]
    fn test_party_size_effective_rounds_odd_large_parties() {
        // Odd parties of 10+ round up to the next even size
        assert_eq!(PartySize::try_from(11).unwrap().effective(), 12);
        assert_eq!(PartySize::try_from(13).unwrap().effective(), 14);
        assert_eq!(PartySize::try_from(19).unwrap().effective(), 20);
    }

    #[test]
    fn test_party_size_effective_leaves_small_and_even_alone() {
        assert_eq!(PartySize::try_from(3).unwrap().effective(), 3);
        assert_eq!(PartySize::try_from(9).unwrap().effective(), 9);
        assert_eq!(PartySize::try_from(10).unwrap().effective(), 10);
        assert_eq!(PartySize::try_from(20).unwrap().effective(), 20);
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(format!("{}", TableId::new(7)), "7");
        assert_eq!(format!("{}", ReservationId::new(9)), "9");
    }

    #[test]
    fn test_table_unit_accessors() {
        let unit = TableUnit::new(TableId::new(3), 12, TableType::Six, 2);
        assert_eq!(unit.id(), TableId::new(3));
        assert_eq!(unit.restaurant_id(), 12);
        assert_eq!(unit.table_type(), TableType::Six);
        assert_eq!(unit.quantity(), 2);
    }

    #[test]
    fn test_table_type_serde() {
        let json = serde_json::to_string(&TableType::Four).unwrap();
        let back: TableType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TableType::Four);
    }
}
