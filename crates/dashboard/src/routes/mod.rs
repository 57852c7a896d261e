//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//!
//! # Auth
//! POST /api/auth/generate-token         - Trade a refresh token for an access token
//!
//! # ShipHero (Authorization: Bearer <access token>)
//! GET  /api/shiphero/customers          - Resolve a legacy customer account ID
//! GET  /api/shiphero/warehouses         - List warehouses
//! GET  /api/shiphero/inventory          - Flat (SKU, location) items
//! GET  /api/shiphero/inventory/export   - Flat items as CSV
//! GET  /api/shiphero/locations          - Stock grouped by bin location
//! ```
//!
//! JSON responses use the envelope `{success, data, meta}`; errors are
//! rendered by [`crate::error::AppError`].

pub mod auth;
pub mod warehouse;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(warehouse::router())
}

/// Success envelope shared by the JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T, M> {
    pub success: bool,
    pub data: T,
    pub meta: M,
}

impl<T, M> ApiResponse<T, M> {
    pub const fn new(data: T, meta: M) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}
