//! Group stock by physical bin location.

use std::collections::HashMap;

use super::contributions;
use super::location_name::{decode_location_name, zone_of};
use crate::types::{LocationAggregate, LocationProduct, RawProductRecord, SlottedSellablePolicy};

/// Build one [`LocationAggregate`] per `(warehouse, location)` pair.
///
/// Location IDs repeat across warehouses, so the warehouse is part of the key.
/// Locations are returned in the order they were first seen. The first record
/// to mention a location decides its name and flags.
#[must_use]
pub fn aggregate_by_location(
    records: &[RawProductRecord],
    policy: SlottedSellablePolicy,
) -> Vec<LocationAggregate> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut locations: Vec<LocationAggregate> = Vec::new();

    for record in records {
        let warehouse_id = record.warehouse_key();

        for contribution in contributions(record, policy) {
            let key = (warehouse_id, contribution.location_id);
            let slot = *index.entry(key).or_insert_with(|| {
                let location_name = decode_location_name(contribution.location_name);
                locations.push(LocationAggregate {
                    location_id: contribution.location_id.to_string(),
                    zone: zone_of(&location_name),
                    location_name,
                    location_name_raw: contribution.location_name.to_string(),
                    pickable: contribution.pickable,
                    sellable: contribution.sellable,
                    warehouse_id: warehouse_id.to_string(),
                    products: Vec::new(),
                    total_items: 0,
                });
                locations.len() - 1
            });

            if let Some(location) = locations.get_mut(slot) {
                location.push_product(LocationProduct {
                    sku: record.sku.clone(),
                    product_name: record.product_name.clone(),
                    quantity: contribution.quantity,
                    barcode: record.barcode.clone(),
                });
            }
        }
    }

    locations.retain(|location| !location.products.is_empty());
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fixtures::{binned, entry, slotted};

    #[test]
    fn test_totals_match_product_sums() {
        let records = vec![
            slotted(
                "SKU-1",
                "WH1",
                vec![entry("L1", "A-1", 3, true), entry("L2", "B-1", 8, true)],
            ),
            slotted("SKU-2", "WH1", vec![entry("L1", "A-1", 5, true)]),
            binned("SKU-3", "WH1", "C-1", 11),
            binned("SKU-4", "WH1", "C-1", 1),
        ];

        let locations = aggregate_by_location(&records, SlottedSellablePolicy::Always);

        assert_eq!(locations.len(), 3);
        for location in &locations {
            let sum: i64 = location.products.iter().map(|p| p.quantity).sum();
            assert_eq!(location.total_items, sum);
        }
        let totals: Vec<(&str, i64)> = locations
            .iter()
            .map(|l| (l.location_id.as_str(), l.total_items))
            .collect();
        assert_eq!(totals, vec![("L1", 8), ("L2", 8), ("C-1", 12)]);
    }

    #[test]
    fn test_same_location_in_two_warehouses_stays_separate() {
        let records = vec![
            binned("SKU-1", "WH1", "A-1", 2),
            binned("SKU-1", "WH2", "A-1", 6),
        ];

        let locations = aggregate_by_location(&records, SlottedSellablePolicy::Always);

        assert_eq!(locations.len(), 2);
        let keys: Vec<(&str, &str, i64)> = locations
            .iter()
            .map(|l| (l.warehouse_id.as_str(), l.location_id.as_str(), l.total_items))
            .collect();
        assert_eq!(keys, vec![("WH1", "A-1", 2), ("WH2", "A-1", 6)]);
    }

    #[test]
    fn test_zero_quantity_entries_never_become_products() {
        let records = vec![slotted(
            "SKU-1",
            "WH1",
            vec![entry("L1", "A-1", 0, true), entry("L2", "A-2", 1, true)],
        )];

        let locations = aggregate_by_location(&records, SlottedSellablePolicy::Always);

        assert_eq!(locations.len(), 1);
        assert!(locations.iter().all(|l| l.products.iter().all(|p| p.quantity > 0)));
    }

    #[test]
    fn test_both_shapes_only_locations_aggregated() {
        let mut record = slotted("SKU-1", "WH1", vec![entry("L1", "A-1", 4, true)]);
        record.inventory_bin = Some("Z-1".to_string());
        record.on_hand = Some(40);

        let locations = aggregate_by_location(&[record], SlottedSellablePolicy::Always);

        assert_eq!(locations.len(), 1);
        assert!(locations.iter().all(|l| l.location_id == "L1"));
    }

    #[test]
    fn test_zone_and_name_derivation() {
        let records = vec![
            slotted("SKU-1", "WH1", vec![entry("L1", "A-12-B", 1, true)]),
            slotted("SKU-2", "WH1", vec![entry("L2", "NOZONE", 1, true)]),
            slotted("SKU-3", "WH1", vec![entry("L3", "V0gtQi0wNw==", 1, true)]),
        ];

        let locations = aggregate_by_location(&records, SlottedSellablePolicy::Always);

        let zones: Vec<&str> = locations.iter().map(|l| l.zone.as_str()).collect();
        assert_eq!(zones, vec!["A", "Unknown", "WH"]);
        let decoded = locations.last();
        assert_eq!(decoded.map(|l| l.location_name.as_str()), Some("WH-B-07"));
        assert_eq!(decoded.map(|l| l.location_name_raw.as_str()), Some("V0gtQi0wNw=="));
    }

    #[test]
    fn test_missing_warehouse_id_falls_back_to_identifier() {
        let mut record = binned("SKU-1", "WH1", "A-1", 2);
        record.warehouse_id = None;

        let locations = aggregate_by_location(&[record], SlottedSellablePolicy::Always);

        assert_eq!(locations.first().map(|l| l.warehouse_id.as_str()), Some("WH1-ident"));
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_location(&[], SlottedSellablePolicy::Always).is_empty());
    }
}
