//! Warehouse listing.

use std::io::Write;

use binscope_dashboard::shiphero::account::list_warehouses;

use super::{CommandError, Context, write_table};

/// Print the account's warehouses.
///
/// # Errors
///
/// Returns `CommandError` if the query fails or stdout cannot be written.
pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let warehouses = list_warehouses(&ctx.client, &ctx.token).await?;

    let rows: Vec<Vec<String>> = warehouses
        .into_iter()
        .map(|warehouse| {
            let (name, place) = warehouse.address.map_or_else(
                || (String::new(), String::new()),
                |address| {
                    let place = [address.city, address.state]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(", ");
                    (address.name.unwrap_or_default(), place)
                },
            );
            vec![
                warehouse.id.into_inner(),
                warehouse.identifier,
                name,
                place,
            ]
        })
        .collect();

    let mut out = std::io::stdout().lock();
    write_table(&mut out, &["ID", "Identifier", "Name", "Location"], &rows)?;
    out.flush()?;
    Ok(())
}
