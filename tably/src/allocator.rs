//! Table allocation policy.
//!
//! This module implements the core packing algorithm: given the free table
//! units for a restaurant, date, and time slot, pick the set of physical
//! units that seats a party. It is a pure function of its inputs, with no
//! I/O, and deterministic: identical inventory and party size always yield
//! the identical assignment (larger table types first, then lowest table
//! id), so concurrent retries cannot diverge.
//!
//! The policy is a precomputed optimal-combination table plus two
//! fallbacks: a shortfall of one capacity category upgrades into larger
//! categories, and a combination that cannot be satisfied at all falls
//! back to a greedy largest-first fill.

use std::collections::BTreeMap;

use crate::inventory::FreeInventory;
use crate::table::{PartySize, TableId, TableType};

/// Preferred table mix per (effective) party size.
///
/// Each entry minimizes table count first and seat slack second; ties
/// resolve toward larger table types. Sizes missing from this table are
/// infeasible by policy. Odd sizes of 10 and above never reach the lookup:
/// [`PartySize::effective`] rounds them up to the next even size first.
const COMBINATIONS: &[(i64, &[(TableType, usize)])] = &[
    (1, &[(TableType::Two, 1)]),
    (2, &[(TableType::Two, 1)]),
    (3, &[(TableType::Four, 1)]),
    (4, &[(TableType::Four, 1)]),
    (5, &[(TableType::Six, 1)]),
    (6, &[(TableType::Six, 1)]),
    (7, &[(TableType::Six, 1), (TableType::Two, 1)]),
    (8, &[(TableType::Six, 1), (TableType::Two, 1)]),
    (9, &[(TableType::Six, 1), (TableType::Four, 1)]),
    (10, &[(TableType::Six, 1), (TableType::Four, 1)]),
    (12, &[(TableType::Six, 2)]),
    (14, &[(TableType::Six, 2), (TableType::Two, 1)]),
    (16, &[(TableType::Six, 2), (TableType::Four, 1)]),
    (18, &[(TableType::Six, 3)]),
    (20, &[(TableType::Six, 3), (TableType::Two, 1)]),
];

/// Maximum acceptable seat slack per consumed table when a combination
/// pair cannot be completed but the accumulated picks already seat the
/// party.
const MAX_SLACK_PER_TABLE: i64 = 6;

/// Looks up the preferred table mix for an effective party size.
fn combination_for(size: i64) -> Option<&'static [(TableType, usize)]> {
    COMBINATIONS
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, pairs)| *pairs)
}

/// Pops the lowest-id free unit of the given category, if any.
fn pop_unit(working: &mut BTreeMap<TableType, Vec<TableId>>, table_type: TableType) -> Option<TableId> {
    let ids = working.get_mut(&table_type)?;
    if ids.is_empty() {
        None
    } else {
        Some(ids.remove(0))
    }
}

/// Takes one unit of the wanted category, falling back to the upgrade
/// chain. Larger units are exhausted in order before the take fails.
fn take_unit(
    working: &mut BTreeMap<TableType, Vec<TableId>>,
    wanted: TableType,
) -> Option<(TableId, TableType)> {
    if let Some(id) = pop_unit(working, wanted) {
        return Some((id, wanted));
    }
    for &upgrade in wanted.upgrades() {
        if let Some(id) = pop_unit(working, upgrade) {
            return Some((id, upgrade));
        }
    }
    None
}

/// Greedy largest-first fill: repeatedly take the largest available unit
/// until the seats cover the target, or `None` when the inventory is
/// exhausted short of it.
fn greedy_fill(free: &FreeInventory, target: i64) -> Option<Vec<TableId>> {
    let mut picked = Vec::new();
    let mut seats = 0;

    'fill: for (table_type, ids) in free.largest_first() {
        for &id in ids {
            if seats >= target {
                break 'fill;
            }
            picked.push(id);
            seats += table_type.seats();
        }
    }

    if seats >= target {
        Some(picked)
    } else {
        None
    }
}

/// Picks the table units to assign to a party, or `None` when no
/// assignment is feasible.
///
/// The returned list may repeat a [`TableId`]: an inventory row describes
/// several identical physical units, and each occurrence consumes one of
/// them. The caller writes one assignment row per element.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tably::{allocator, FreeInventory, PartySize, TableId, TableType};
///
/// let mut units = BTreeMap::new();
/// units.insert(TableType::Four, vec![TableId::new(1)]);
/// units.insert(TableType::Six, vec![TableId::new(2)]);
/// let free = FreeInventory::from_units(units);
///
/// // A party of four gets the exact-fit 4-seat unit, leaving the 6-seat
/// // unit free for a later, larger party.
/// let party = PartySize::try_from(4).unwrap();
/// assert_eq!(allocator::allocate(&free, party), Some(vec![TableId::new(1)]));
/// ```
#[must_use]
pub fn allocate(free: &FreeInventory, party: PartySize) -> Option<Vec<TableId>> {
    let target = party.effective();

    // Sizes outside the combination table are infeasible by policy.
    let pairs = combination_for(target)?;

    let mut working = free.to_working_set();
    let mut picked: Vec<TableId> = Vec::new();
    let mut seats: i64 = 0;

    for &(table_type, count) in pairs {
        for _ in 0..count {
            match take_unit(&mut working, table_type) {
                Some((id, actual_type)) => {
                    picked.push(id);
                    seats += actual_type.seats();
                }
                None => {
                    // The pair cannot be completed. Accept what we have if
                    // it already seats the party within the slack bound,
                    // otherwise start over with the greedy fill.
                    let slack = seats - target;
                    if seats >= target && slack <= MAX_SLACK_PER_TABLE * picked.len() as i64 {
                        return Some(picked);
                    }
                    return greedy_fill(free, target);
                }
            }
        }
    }

    Some(picked)
}

/// Total seats of an assignment against the given inventory-independent
/// table types.
///
/// Convenience for callers that report seat totals; the allocator itself
/// tracks seats internally.
#[must_use]
pub fn seats_of(types: &[TableType]) -> i64 {
    types.iter().map(|t| t.seats()).sum()
}
