//! Bin locations with the SKUs stored in them.

use serde::{Deserialize, Serialize};

/// One physical location with every SKU stored there.
///
/// `total_items` always equals the sum of `products[].quantity`; use
/// [`LocationAggregate::push_product`] rather than touching `products` directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAggregate {
    /// Location ID (the bin for statically slotted products).
    pub location_id: String,
    /// Display name, base64-decoded when the raw name was encoded.
    pub location_name: String,
    /// Name exactly as reported by the warehouse.
    pub location_name_raw: String,
    /// Zone derived from the display name.
    pub zone: String,
    pub pickable: bool,
    pub sellable: bool,
    pub warehouse_id: String,
    pub products: Vec<LocationProduct>,
    pub total_items: i64,
}

/// A SKU stored in a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProduct {
    pub sku: String,
    pub product_name: String,
    pub quantity: i64,
    pub barcode: Option<String>,
}

/// Totals across a set of locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    /// Number of locations holding stock.
    pub total_locations: usize,
    /// Number of (location, SKU) entries.
    pub total_skus: usize,
    /// Units across all locations.
    pub total_units: i64,
}

impl LocationAggregate {
    /// Append a product and keep `total_items` in step.
    pub fn push_product(&mut self, product: LocationProduct) {
        self.total_items += product.quantity;
        self.products.push(product);
    }
}

impl LocationSummary {
    /// Summarize a set of aggregated locations.
    #[must_use]
    pub fn from_locations(locations: &[LocationAggregate]) -> Self {
        Self {
            total_locations: locations.len(),
            total_skus: locations.iter().map(|loc| loc.products.len()).sum(),
            total_units: locations.iter().map(|loc| loc.total_items).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: &str) -> LocationAggregate {
        LocationAggregate {
            location_id: id.to_string(),
            location_name: id.to_string(),
            location_name_raw: id.to_string(),
            zone: "A".to_string(),
            pickable: true,
            sellable: true,
            warehouse_id: "WH1".to_string(),
            products: Vec::new(),
            total_items: 0,
        }
    }

    fn product(sku: &str, quantity: i64) -> LocationProduct {
        LocationProduct {
            sku: sku.to_string(),
            product_name: sku.to_string(),
            quantity,
            barcode: None,
        }
    }

    #[test]
    fn test_push_product_updates_total() {
        let mut loc = location("A-1");
        loc.push_product(product("SKU-1", 3));
        loc.push_product(product("SKU-2", 9));
        assert_eq!(loc.total_items, 12);
        assert_eq!(loc.products.len(), 2);
    }

    #[test]
    fn test_summary() {
        let mut a = location("A-1");
        a.push_product(product("SKU-1", 3));
        a.push_product(product("SKU-2", 2));
        let mut b = location("B-1");
        b.push_product(product("SKU-1", 10));

        let summary = LocationSummary::from_locations(&[a, b]);
        assert_eq!(
            summary,
            LocationSummary {
                total_locations: 2,
                total_skus: 3,
                total_units: 15,
            }
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(location("A-1")).unwrap_or_default();
        assert!(value.get("locationNameRaw").is_some());
        assert!(value.get("totalItems").is_some());
    }
}
