//! Inventory views: flat items, CSV export, and bin-location aggregates.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use binscope_core::{
    FlatInventoryItem, LocationAggregate, LocationSummary, aggregate_by_location,
    normalize_to_flat_items, render_csv,
};
use serde::Serialize;
use tracing::instrument;

use super::{InventoryQuery, fetch_products};
use crate::error::AppError;
use crate::middleware::BearerToken;
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Meta block of the flat inventory response.
#[derive(Debug, Serialize)]
pub struct InventoryMeta {
    pub total_items: usize,
    pub customer_account_id: String,
    pub pages_fetched: u32,
    pub truncated: bool,
}

/// Meta block of the locations response.
#[derive(Debug, Serialize)]
pub struct LocationsMeta {
    pub total_locations: usize,
    pub total_skus: usize,
    pub total_units: i64,
    pub fetch_duration_ms: u128,
    pub pages_fetched: u32,
    pub truncated: bool,
    pub customer_account_id: String,
}

/// List one item per (SKU, location) with stock.
#[instrument(skip_all)]
pub async fn inventory(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(params): Query<InventoryQuery>,
) -> Result<Json<ApiResponse<Vec<FlatInventoryItem>, InventoryMeta>>, AppError> {
    let filter = params.into_filter()?;
    let fetch = fetch_products(&state, &token, &filter).await?;

    let items = normalize_to_flat_items(
        &fetch.outcome.records,
        state.config().shiphero.slotted_sellable,
    );
    tracing::info!(
        records = fetch.outcome.records.len(),
        items = items.len(),
        duration_ms = fetch.duration_ms,
        "Normalized inventory"
    );

    let meta = InventoryMeta {
        total_items: items.len(),
        customer_account_id: filter.customer_account_id.into_inner(),
        pages_fetched: fetch.outcome.pages_fetched,
        truncated: fetch.outcome.truncated,
    };
    Ok(Json(ApiResponse::new(items, meta)))
}

/// Download the flat inventory as CSV.
#[instrument(skip_all)]
pub async fn export(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(params): Query<InventoryQuery>,
) -> Result<Response, AppError> {
    let filter = params.into_filter()?;
    let fetch = fetch_products(&state, &token, &filter).await?;

    let items = normalize_to_flat_items(
        &fetch.outcome.records,
        state.config().shiphero.slotted_sellable,
    );
    if fetch.outcome.truncated {
        tracing::warn!(rows = items.len(), "Exporting a truncated inventory");
    }

    let disposition = format!(
        "attachment; filename=\"inventory-{}.csv\"",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        render_csv(&items),
    )
        .into_response())
}

/// List bin locations with the SKUs stored in each.
#[instrument(skip_all)]
pub async fn locations(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(params): Query<InventoryQuery>,
) -> Result<Json<ApiResponse<Vec<LocationAggregate>, LocationsMeta>>, AppError> {
    let filter = params.into_filter()?;
    let fetch = fetch_products(&state, &token, &filter).await?;

    let locations = aggregate_by_location(
        &fetch.outcome.records,
        state.config().shiphero.slotted_sellable,
    );
    let summary = LocationSummary::from_locations(&locations);
    tracing::info!(
        locations = summary.total_locations,
        units = summary.total_units,
        duration_ms = fetch.duration_ms,
        "Aggregated locations"
    );

    let meta = LocationsMeta {
        total_locations: summary.total_locations,
        total_skus: summary.total_skus,
        total_units: summary.total_units,
        fetch_duration_ms: fetch.duration_ms,
        pages_fetched: fetch.outcome.pages_fetched,
        truncated: fetch.outcome.truncated,
        customer_account_id: filter.customer_account_id.into_inner(),
    };
    Ok(Json(ApiResponse::new(locations, meta)))
}
