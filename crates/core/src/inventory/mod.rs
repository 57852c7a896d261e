//! Inventory normalization and bin-location aggregation.
//!
//! Both views share one rule for which locations a record contributes:
//!
//! 1. A non-empty `locations` list (dynamic slotting) wins. Each entry with a
//!    positive quantity contributes; `pickable` comes from the entry and
//!    `sellable` from [`SlottedSellablePolicy`].
//! 2. Otherwise a set `inventory_bin` with `on_hand > 0` (static slotting)
//!    contributes exactly once, with `pickable = sellable = active != false`.
//! 3. Otherwise the record contributes nothing.
//!
//! None of these functions fail; malformed records are dropped.

mod aggregate;
mod export;
mod location_name;
mod normalize;

pub use aggregate::aggregate_by_location;
pub use export::{CSV_HEADER, render_csv};
pub use location_name::{UNKNOWN_ZONE, decode_location_name, zone_of};
pub use normalize::normalize_to_flat_items;

use crate::types::{RawProductRecord, SlottedSellablePolicy};

/// A location a record holds stock in, after applying the slotting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Contribution<'a> {
    location_id: &'a str,
    location_name: &'a str,
    quantity: i64,
    pickable: bool,
    sellable: bool,
}

/// Locations the record contributes, per the module-level rule.
fn contributions(
    record: &RawProductRecord,
    policy: SlottedSellablePolicy,
) -> Vec<Contribution<'_>> {
    if let Some(locations) = record.slotted_locations() {
        let sellable = policy.sellable(record.is_active());
        return locations
            .iter()
            .filter(|entry| entry.quantity > 0)
            .map(|entry| Contribution {
                location_id: &entry.location_id,
                location_name: &entry.location_name,
                quantity: entry.quantity,
                pickable: entry.pickable,
                sellable,
            })
            .collect();
    }

    if let Some((bin, on_hand)) = record.static_bin() {
        let active = record.is_active();
        return vec![Contribution {
            location_id: bin,
            location_name: bin,
            quantity: on_hand,
            pickable: active,
            sellable: active,
        }];
    }

    Vec::new()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{binned, entry, slotted};
    use super::*;

    #[test]
    fn test_slotted_skips_empty_locations() {
        let record = slotted(
            "SKU-1",
            "WH1",
            vec![entry("L1", "A-1", 0, true), entry("L2", "A-2", 5, false)],
        );
        let found = contributions(&record, SlottedSellablePolicy::Always);
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|c| c.location_id), Some("L2"));
        assert_eq!(found.first().map(|c| c.pickable), Some(false));
    }

    #[test]
    fn test_slotted_wins_over_bin() {
        let mut record = slotted("SKU-1", "WH1", vec![entry("L1", "A-1", 2, true)]);
        record.inventory_bin = Some("Z-9".to_string());
        record.on_hand = Some(50);

        let found = contributions(&record, SlottedSellablePolicy::Always);
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|c| c.location_id), Some("L1"));
    }

    #[test]
    fn test_inactive_bin_is_neither_pickable_nor_sellable() {
        let mut record = binned("SKU-1", "WH1", "B-1", 3);
        record.active = Some(false);
        let found = contributions(&record, SlottedSellablePolicy::Always);
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|c| !c.pickable && !c.sellable));
    }

    #[test]
    fn test_record_without_stock_contributes_nothing() {
        let record = RawProductRecord {
            sku: "SKU-1".to_string(),
            ..Default::default()
        };
        assert!(contributions(&record, SlottedSellablePolicy::Always).is_empty());
    }

    #[test]
    fn test_active_policy_uses_product_flag() {
        let mut record = slotted("SKU-1", "WH1", vec![entry("L1", "A-1", 2, true)]);
        record.active = Some(false);
        let found = contributions(&record, SlottedSellablePolicy::Active);
        assert!(found.iter().all(|c| !c.sellable));
    }
}
