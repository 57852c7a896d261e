//! Warehouse listing, customer resolution and token generation.

use binscope_integration_tests::{FakeShipHero, TEST_CUSTOMER, TEST_TOKEN, spawn_dashboard};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn post_token(base_url: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/auth/generate-token"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

// =============================================================================
// Warehouses
// =============================================================================

#[tokio::test]
async fn test_warehouses_listed_with_meta() {
    let fake = FakeShipHero::start().await;
    fake.set_warehouses(vec![
        json!({
            "id": "V2FyZWhvdXNlOjE=",
            "legacy_id": 1,
            "identifier": "Primary",
            "address": { "name": "Main", "city": "Reno", "state": "NV" }
        }),
        json!({ "identifier": "no id, skipped" }),
        json!({ "id": "V2FyZWhvdXNlOjI=", "identifier": "Overflow", "address": null }),
    ]);
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, body) = dashboard.get_json("/api/shiphero/warehouses").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["meta"]["total_warehouses"], 2);
    assert_eq!(body["data"][0]["id"], "V2FyZWhvdXNlOjE=");
    assert_eq!(body["data"][0]["address"]["city"], "Reno");
    assert_eq!(body["data"][1]["identifier"], "Overflow");

    let requests = fake.requests_for("GetAccountWarehouses");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(format!("Bearer {TEST_TOKEN}").as_str())
    );
}

#[tokio::test]
async fn test_warehouses_rejected_token() {
    let fake = FakeShipHero::start().await;
    fake.fail_with(401, r#"{"message":"invalid token"}"#);
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, body) = dashboard.get_json("/api/shiphero/warehouses").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

// =============================================================================
// Customer resolution
// =============================================================================

#[tokio::test]
async fn test_customer_lookup() {
    let fake = FakeShipHero::start().await;
    fake.set_customer_uuid(Some("Q3VzdG9tZXJBY2NvdW50OjQy"));
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, body) = dashboard.get_json("/api/shiphero/customers?legacy_id=42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "Q3VzdG9tZXJBY2NvdW50OjQy");
    assert_eq!(body["data"]["legacy_id"], 42);
    assert_eq!(body["meta"]["method"], "lookup");

    let request = fake.requests_for("GetCustomerUuid").into_iter().next().unwrap();
    assert_eq!(request.variables["legacy_id"], 42);
}

#[tokio::test]
async fn test_customer_falls_back_to_local_uuid() {
    let fake = FakeShipHero::start().await;
    fake.set_customer_uuid(None);
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, body) = dashboard
        .get_json("/api/shiphero/customers?legacy_id=88774")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], TEST_CUSTOMER);
    assert_eq!(body["meta"]["method"], "manual_uuid");
}

#[tokio::test]
async fn test_customer_lookup_does_not_mask_rate_limits() {
    let fake = FakeShipHero::start().await;
    fake.fail_with(429, "slow down");
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, _) = dashboard.get_json("/api/shiphero/customers?legacy_id=42").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_customer_requires_numeric_legacy_id() {
    let fake = FakeShipHero::start().await;
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    for path in [
        "/api/shiphero/customers",
        "/api/shiphero/customers?legacy_id=",
        "/api/shiphero/customers?legacy_id=abc",
    ] {
        let (status, body) = dashboard.get_json(path).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["success"], false);
    }
    assert!(fake.requests().is_empty());
}

// =============================================================================
// Token generation
// =============================================================================

#[tokio::test]
async fn test_generate_token() {
    let fake = FakeShipHero::start().await;
    fake.set_access_token("fresh-access-token");
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, body) =
        post_token(&dashboard.base_url, json!({ "refreshToken": "refresh-123" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "accessToken": "fresh-access-token" }));

    let request = fake.requests_for("GenerateAccessToken").into_iter().next().unwrap();
    assert_eq!(request.variables["refresh_token"], "refresh-123");
    assert_eq!(request.authorization, None);
}

#[tokio::test]
async fn test_generate_token_mutation_error_is_bad_request() {
    let fake = FakeShipHero::start().await;
    fake.set_token_errors(&["Refresh token expired"]);
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, body) =
        post_token(&dashboard.base_url, json!({ "refreshToken": "stale" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Refresh token expired"));
}

#[tokio::test]
async fn test_generate_token_requires_refresh_token() {
    let fake = FakeShipHero::start().await;
    let dashboard = spawn_dashboard(&fake.graphql_url(), &[]).await;

    let (status, _) = post_token(&dashboard.base_url, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(fake.requests().is_empty());
}
