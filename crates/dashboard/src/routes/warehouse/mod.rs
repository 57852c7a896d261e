//! Warehouse route handlers.
//!
//! Read-only views of a 3PL customer's stock in `ShipHero`: flat inventory
//! items, bin-location aggregates, a CSV export, plus the account lookups an
//! operator needs to pick a customer and warehouse.

mod account;
mod inventory;

use std::time::Instant;

use axum::{Router, routing::get};
use binscope_core::{CustomerAccountId, RawProductRecord, WarehouseId};
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::AppError;
use crate::shiphero::inventory::fetch_warehouse_products;
use crate::shiphero::{FetchOutcome, InventoryFilter};
use crate::state::AppState;

pub use account::{CustomersMeta, CustomersQuery, WarehousesMeta};
pub use inventory::{InventoryMeta, LocationsMeta};

// =============================================================================
// Router
// =============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        // Account lookups
        .route("/api/shiphero/customers", get(account::customers))
        .route("/api/shiphero/warehouses", get(account::warehouses))
        // Inventory views
        .route("/api/shiphero/inventory", get(inventory::inventory))
        .route("/api/shiphero/inventory/export", get(inventory::export))
        .route("/api/shiphero/locations", get(inventory::locations))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Query parameters shared by the inventory views.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    /// Customer account UUID (required).
    pub customer_account_id: Option<String>,
    /// Restrict to one warehouse.
    pub warehouse_id: Option<String>,
    /// Restrict to one SKU.
    pub sku: Option<String>,
}

impl InventoryQuery {
    /// Validate the parameters into a fetch filter.
    ///
    /// Blank optional parameters are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `customer_account_id` is missing or blank.
    pub fn into_filter(self) -> Result<InventoryFilter, AppError> {
        let customer_account_id = self
            .customer_account_id
            .as_deref()
            .and_then(|id| CustomerAccountId::parse(id).ok())
            .ok_or_else(|| AppError::BadRequest("customer_account_id is required".to_string()))?;

        Ok(InventoryFilter {
            customer_account_id,
            warehouse_id: self
                .warehouse_id
                .as_deref()
                .and_then(|id| WarehouseId::parse(id).ok()),
            sku: self
                .sku
                .map(|sku| sku.trim().to_string())
                .filter(|sku| !sku.is_empty()),
        })
    }
}

/// Result of a full warehouse products walk plus how long it took.
struct TimedFetch {
    outcome: FetchOutcome<RawProductRecord>,
    duration_ms: u128,
}

/// Fetch every warehouse product for `filter`, bounded by the fetch timeout.
///
/// On timeout the in-flight walk is dropped, which stops it before the next
/// page request.
async fn fetch_products(
    state: &AppState,
    access_token: &SecretString,
    filter: &InventoryFilter,
) -> Result<TimedFetch, AppError> {
    let settings = &state.config().shiphero;
    let started = Instant::now();

    let outcome = tokio::time::timeout(
        settings.fetch_timeout,
        fetch_warehouse_products(state.shiphero(), access_token, filter, settings.pagination),
    )
    .await
    .map_err(|_| AppError::Timeout(settings.fetch_timeout))??;

    Ok(TimedFetch {
        outcome,
        duration_ms: started.elapsed().as_millis(),
    })
}
