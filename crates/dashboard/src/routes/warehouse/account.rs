//! Account lookups: customer resolution and warehouse listing.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::BearerToken;
use crate::routes::ApiResponse;
use crate::shiphero::account::{list_warehouses, resolve_customer};
use crate::shiphero::{CustomerAccount, CustomerResolution, Warehouse};
use crate::state::AppState;

/// Query parameters for customer resolution.
#[derive(Debug, Deserialize)]
pub struct CustomersQuery {
    /// Legacy numeric customer account ID.
    pub legacy_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomersMeta {
    pub method: CustomerResolution,
}

#[derive(Debug, Serialize)]
pub struct WarehousesMeta {
    pub total_warehouses: usize,
}

/// Resolve a legacy customer account ID to the UUID the inventory views need.
#[instrument(skip_all)]
pub async fn customers(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(params): Query<CustomersQuery>,
) -> Result<Json<ApiResponse<CustomerAccount, CustomersMeta>>, AppError> {
    let legacy_id = params
        .legacy_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("legacy_id is required".to_string()))?
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("legacy_id must be an integer".to_string()))?;

    let account = resolve_customer(state.shiphero(), &token, legacy_id).await?;
    let meta = CustomersMeta {
        method: account.resolved_by,
    };
    Ok(Json(ApiResponse::new(account, meta)))
}

/// List the warehouses visible to the operator's account.
#[instrument(skip_all)]
pub async fn warehouses(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Warehouse>, WarehousesMeta>>, AppError> {
    let warehouses = list_warehouses(state.shiphero(), &token).await?;
    let meta = WarehousesMeta {
        total_warehouses: warehouses.len(),
    };
    Ok(Json(ApiResponse::new(warehouses, meta)))
}
