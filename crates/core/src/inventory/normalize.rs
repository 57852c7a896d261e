//! Flatten warehouse products into (SKU, location) line items.

use super::contributions;
use super::location_name::{decode_location_name, zone_of};
use crate::types::{FlatInventoryItem, RawProductRecord, SlottedSellablePolicy};

/// Produce one [`FlatInventoryItem`] per SKU per location holding stock.
///
/// Output order follows record order, then location order within a record.
/// `location` carries the name exactly as `ShipHero` stored it; only the zone
/// is read through [`decode_location_name`].
#[must_use]
pub fn normalize_to_flat_items(
    records: &[RawProductRecord],
    policy: SlottedSellablePolicy,
) -> Vec<FlatInventoryItem> {
    records
        .iter()
        .flat_map(|record| {
            contributions(record, policy)
                .into_iter()
                .map(move |contribution| {
                    FlatInventoryItem {
                        sku: record.sku.clone(),
                        product_name: record.product_name.clone(),
                        quantity: contribution.quantity,
                        zone: zone_of(&decode_location_name(contribution.location_name)),
                        location: contribution.location_name.to_string(),
                        location_id: contribution.location_id.to_string(),
                        pickable: contribution.pickable,
                        sellable: contribution.sellable,
                        warehouse: record.warehouse_identifier.clone(),
                        barcode: record.barcode.clone(),
                    }
                })
        })
        .collect()
}
