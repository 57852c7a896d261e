//! Inventory commands: flat items, locations, CSV export.

use std::fs;
use std::io::Write;
use std::path::Path;

use binscope_core::{
    FlatInventoryItem, LocationAggregate, LocationSummary, RawProductRecord,
    SlottedSellablePolicy, aggregate_by_location, normalize_to_flat_items, render_csv,
};
use binscope_dashboard::shiphero::InventoryFilter;
use binscope_dashboard::shiphero::inventory::fetch_warehouse_products;

use super::{CommandError, Context, write_table};

async fn fetch(ctx: &Context, filter: &InventoryFilter) -> Result<Vec<RawProductRecord>, CommandError> {
    let outcome = fetch_warehouse_products(&ctx.client, &ctx.token, filter, ctx.settings).await?;
    if outcome.truncated {
        tracing::warn!(
            pages = outcome.pages_fetched,
            "Results truncated at the page cap; raise --max-pages to see everything"
        );
    }
    Ok(outcome.records)
}

/// Print one row per SKU and location.
///
/// # Errors
///
/// Returns `CommandError` if the fetch fails or stdout cannot be written.
pub async fn items(
    ctx: &Context,
    filter: &InventoryFilter,
    policy: SlottedSellablePolicy,
    json: bool,
) -> Result<(), CommandError> {
    let records = fetch(ctx, filter).await?;
    let items = normalize_to_flat_items(&records, policy);

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &items)?;
        writeln!(out)?;
    } else {
        write_table(
            &mut out,
            &["Warehouse", "Location", "Zone", "SKU", "Qty", "Pickable", "Sellable"],
            &item_rows(&items),
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Print stock grouped by bin location, followed by totals.
///
/// # Errors
///
/// Returns `CommandError` if the fetch fails or stdout cannot be written.
pub async fn locations(
    ctx: &Context,
    filter: &InventoryFilter,
    policy: SlottedSellablePolicy,
    json: bool,
) -> Result<(), CommandError> {
    let records = fetch(ctx, filter).await?;
    let locations = aggregate_by_location(&records, policy);
    let summary = LocationSummary::from_locations(&locations);

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(
            &mut out,
            &serde_json::json!({ "locations": locations, "summary": summary }),
        )?;
        writeln!(out)?;
    } else {
        write_table(
            &mut out,
            &["Warehouse", "Location", "Zone", "SKUs", "Units"],
            &location_rows(&locations),
        )?;
        writeln!(
            out,
            "\n{} locations, {} SKU entries, {} units",
            summary.total_locations, summary.total_skus, summary.total_units
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Write the flat inventory as CSV to `output`, or stdout.
///
/// # Errors
///
/// Returns `CommandError` if the fetch fails or the output cannot be written.
pub async fn export(
    ctx: &Context,
    filter: &InventoryFilter,
    policy: SlottedSellablePolicy,
    output: Option<&Path>,
) -> Result<(), CommandError> {
    let records = fetch(ctx, filter).await?;
    let items = normalize_to_flat_items(&records, policy);
    let csv = render_csv(&items);

    match output {
        Some(path) => {
            fs::write(path, csv)?;
            tracing::info!(rows = items.len(), path = %path.display(), "Wrote CSV export");
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(csv.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

fn item_rows(items: &[FlatInventoryItem]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| {
            vec![
                item.warehouse.clone(),
                item.location.clone(),
                item.zone.clone(),
                item.sku.clone(),
                item.quantity.to_string(),
                yes_no(item.pickable),
                yes_no(item.sellable),
            ]
        })
        .collect()
}

fn location_rows(locations: &[LocationAggregate]) -> Vec<Vec<String>> {
    locations
        .iter()
        .map(|location| {
            vec![
                location.warehouse_id.clone(),
                location.location_name.clone(),
                location.zone.clone(),
                location.products.len().to_string(),
                location.total_items.to_string(),
            ]
        })
        .collect()
}
