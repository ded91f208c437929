//! Property-based tests for the allocation policy.
//!
//! These exercise the allocator across randomly generated inventories and
//! party sizes, checking the invariants that unit tests spot-check.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::allocator;
use crate::inventory::FreeInventory;
use crate::table::{PartySize, TableId, TableType};

/// Generates an inventory with up to five physical units per category.
///
/// Ids are disjoint across categories (2-seaters in 100.., 4-seaters in
/// 200.., 6-seaters in 300..) so a picked id maps back to its capacity.
fn arb_inventory() -> impl Strategy<Value = FreeInventory> {
    (0usize..=5, 0usize..=5, 0usize..=5).prop_map(|(twos, fours, sixes)| {
        let mut units = BTreeMap::new();
        units.insert(
            TableType::Two,
            (0..twos).map(|i| TableId::new(100 + i as i64)).collect(),
        );
        units.insert(
            TableType::Four,
            (0..fours).map(|i| TableId::new(200 + i as i64)).collect(),
        );
        units.insert(
            TableType::Six,
            (0..sixes).map(|i| TableId::new(300 + i as i64)).collect(),
        );
        FreeInventory::from_units(units)
    })
}

fn seats_of_pick(id: TableId) -> i64 {
    match id.value() {
        100..=199 => 2,
        200..=299 => 4,
        _ => 6,
    }
}

proptest! {
    #[test]
    fn allocation_is_deterministic(
        free in arb_inventory(),
        guests in 1i64..=20,
    ) {
        let party = PartySize::try_from(guests).unwrap();
        let first = allocator::allocate(&free, party);
        let second = allocator::allocate(&free, party);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn allocation_seats_the_party(
        free in arb_inventory(),
        guests in 1i64..=20,
    ) {
        let party = PartySize::try_from(guests).unwrap();
        if let Some(picked) = allocator::allocate(&free, party) {
            let seats: i64 = picked.iter().map(|&id| seats_of_pick(id)).sum();
            prop_assert!(
                seats >= party.effective(),
                "picked {} seats for an effective party of {}",
                seats,
                party.effective()
            );
        }
    }

    #[test]
    fn allocation_respects_inventory(
        free in arb_inventory(),
        guests in 1i64..=20,
    ) {
        let party = PartySize::try_from(guests).unwrap();
        if let Some(picked) = allocator::allocate(&free, party) {
            for &id in &picked {
                let available: usize = TableType::ALL
                    .iter()
                    .map(|&t| free.units_of(t).iter().filter(|&&u| u == id).count())
                    .sum();
                let used = picked.iter().filter(|&&u| u == id).count();
                prop_assert!(
                    used <= available,
                    "unit {} used {} times but only {} available",
                    id,
                    used,
                    available
                );
            }
        }
    }

    #[test]
    fn allocation_fails_when_capacity_short(
        free in arb_inventory(),
        guests in 1i64..=20,
    ) {
        let party = PartySize::try_from(guests).unwrap();
        if free.total_seats() < guests {
            prop_assert_eq!(allocator::allocate(&free, party), None);
        }
    }

    #[test]
    fn full_category_stock_always_feasible(guests in 1i64..=20) {
        // Four units of every category always cover the 20-guest ceiling
        let mut units = BTreeMap::new();
        units.insert(TableType::Two, (0..4).map(|i| TableId::new(100 + i)).collect());
        units.insert(TableType::Four, (0..4).map(|i| TableId::new(200 + i)).collect());
        units.insert(TableType::Six, (0..4).map(|i| TableId::new(300 + i)).collect());
        let free = FreeInventory::from_units(units);

        let party = PartySize::try_from(guests).unwrap();
        prop_assert!(allocator::allocate(&free, party).is_some());
    }
}
