//! Raw warehouse product records as returned page by page from `ShipHero`.

use serde::{Deserialize, Serialize};

/// One warehouse product (a SKU stocked in one warehouse).
///
/// Dynamically slotted warehouses report stock through `locations`; statically
/// slotted ones use `inventory_bin` and `on_hand`. A record carrying neither
/// contributes nothing downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductRecord {
    /// Product SKU.
    pub sku: String,
    /// Product name (the SKU when the product has no name).
    pub product_name: String,
    /// Barcode.
    pub barcode: Option<String>,
    /// Human-readable warehouse identifier (e.g. "Primary").
    pub warehouse_identifier: String,
    /// `ShipHero` warehouse ID.
    pub warehouse_id: Option<String>,
    /// Quantity on hand (static slotting).
    pub on_hand: Option<i64>,
    /// Fixed bin (static slotting).
    pub inventory_bin: Option<String>,
    /// Whether the warehouse product is active.
    pub active: Option<bool>,
    /// Per-location stock (dynamic slotting).
    pub locations: Option<Vec<LocationEntry>>,
}

/// Stock of one SKU in one dynamically slotted location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    /// Location ID.
    pub location_id: String,
    /// Location name as reported (may be base64 encoded).
    pub location_name: String,
    /// Units stored here.
    pub quantity: i64,
    /// Whether items can be picked from this location.
    pub pickable: bool,
}

impl RawProductRecord {
    /// Locations with stock, if the record is dynamically slotted.
    ///
    /// Returns `None` when `locations` is absent or empty, which is the signal
    /// to fall back to the static bin fields.
    #[must_use]
    pub fn slotted_locations(&self) -> Option<&[LocationEntry]> {
        self.locations
            .as_deref()
            .filter(|locations| !locations.is_empty())
    }

    /// Static bin and quantity, if the record is statically slotted with stock.
    #[must_use]
    pub fn static_bin(&self) -> Option<(&str, i64)> {
        let bin = self.inventory_bin.as_deref().filter(|bin| !bin.is_empty())?;
        let on_hand = self.on_hand.filter(|&qty| qty > 0)?;
        Some((bin, on_hand))
    }

    /// `false` only when the product is explicitly inactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// Warehouse key used to group locations.
    ///
    /// Prefers the `ShipHero` warehouse ID and falls back to the identifier.
    #[must_use]
    pub fn warehouse_key(&self) -> &str {
        self.warehouse_id
            .as_deref()
            .unwrap_or(&self.warehouse_identifier)
    }
}
