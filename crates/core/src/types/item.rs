//! Flat inventory line items.

use serde::{Deserialize, Serialize};

/// One (SKU, location) pair ready for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatInventoryItem {
    pub sku: String,
    pub product_name: String,
    pub quantity: i64,
    /// Location name as stored upstream (the bin for statically slotted products).
    pub location: String,
    pub location_id: String,
    /// Zone derived from the decoded location name.
    pub zone: String,
    pub pickable: bool,
    pub sellable: bool,
    /// Warehouse identifier.
    pub warehouse: String,
    pub barcode: Option<String>,
}
