//! CSV export of flat inventory items.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::types::FlatInventoryItem;

/// Header row of the inventory export.
pub const CSV_HEADER: &str = "Warehouse,Location,Zone,SKU,Product,Quantity,Barcode";

/// Render items as CSV, one row per item, `\n` line endings.
///
/// Fields containing a comma, quote, or line break are quoted with embedded
/// quotes doubled.
#[must_use]
pub fn render_csv(items: &[FlatInventoryItem]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + items.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for item in items {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            escape(&item.warehouse),
            escape(&item.location),
            escape(&item.zone),
            escape(&item.sku),
            escape(&item.product_name),
            item.quantity,
            escape(item.barcode.as_deref().unwrap_or_default()),
        );
    }

    out
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_name: &str, barcode: Option<&str>) -> FlatInventoryItem {
        FlatInventoryItem {
            sku: "SKU-1".to_string(),
            product_name: product_name.to_string(),
            quantity: 7,
            location: "A-01-02".to_string(),
            location_id: "TG9jYXRpb246MQ==".to_string(),
            zone: "A".to_string(),
            pickable: true,
            sellable: true,
            warehouse: "Primary".to_string(),
            barcode: barcode.map(String::from),
        }
    }

    #[test]
    fn test_header_only_for_empty_input() {
        assert_eq!(render_csv(&[]), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_plain_row() {
        let csv = render_csv(&[item("Coconut Water", Some("0123456789"))]);
        assert_eq!(
            csv.lines().nth(1),
            Some("Primary,A-01-02,A,SKU-1,Coconut Water,7,0123456789")
        );
    }

    #[test]
    fn test_quotes_fields_with_commas_and_quotes() {
        let csv = render_csv(&[item("Mug, 12oz \"Large\"", None)]);
        assert_eq!(
            csv.lines().nth(1),
            Some("Primary,A-01-02,A,SKU-1,\"Mug, 12oz \"\"Large\"\"\",7,")
        );
    }
}
