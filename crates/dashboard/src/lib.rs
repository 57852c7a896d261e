//! Binscope dashboard library.
//!
//! Bin-location inventory API for 3PL operators on `ShipHero`. The binary in
//! `main.rs` only wires configuration, logging and the listener; everything a
//! request touches lives here so it can be tested in-process.
//!
//! # Security
//!
//! The server holds no `ShipHero` credentials. Every `/api/shiphero` request
//! carries the operator's own bearer token, which is forwarded and dropped.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shiphero;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the full application router with tracing and Sentry layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not contact `ShipHero`.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::DashboardConfig;

    fn app() -> Router {
        let config = DashboardConfig::from_source(|key| {
            (key == "SHIPHERO_GRAPHQL_URL").then(|| "http://127.0.0.1:9/graphql".to_string())
        })
        .unwrap();
        build_app(AppState::new(config).unwrap())
    }

    async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_inventory_requires_bearer() {
        let (status, body) = get(
            app(),
            "/api/shiphero/inventory?customer_account_id=abc",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_inventory_requires_customer() {
        let (status, body) = get(app(), "/api/shiphero/inventory", Some("token")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad request: customer_account_id is required");
    }

    #[tokio::test]
    async fn test_locations_rejects_blank_customer() {
        let (status, _) = get(
            app(),
            "/api/shiphero/locations?customer_account_id=%20",
            Some("token"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_customers_rejects_non_numeric_legacy_id() {
        let (status, body) = get(
            app(),
            "/api/shiphero/customers?legacy_id=abc",
            Some("token"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad request: legacy_id must be an integer");
    }

    #[tokio::test]
    async fn test_generate_token_requires_refresh_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/generate-token")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"refreshToken": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
