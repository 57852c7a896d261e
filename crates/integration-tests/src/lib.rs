//! Integration tests for Binscope.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p binscope-integration-tests
//! ```
//!
//! No network access or credentials are needed. [`FakeShipHero`] serves the
//! GraphQL operations the dashboard uses from an in-process axum server on an
//! ephemeral port, and [`spawn_dashboard`] runs the real dashboard router
//! against it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use binscope_dashboard::config::DashboardConfig;
use binscope_dashboard::state::AppState;
use serde_json::{Value, json};
use url::Url;

/// Access token the tests send to the dashboard.
pub const TEST_TOKEN: &str = "test-access-token";

/// Customer account UUID for legacy ID 88774.
pub const TEST_CUSTOMER: &str = "Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0";

/// A GraphQL request as received by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub variables: Value,
    pub authorization: Option<String>,
}

/// How `warehouse_products` pages are served.
#[derive(Debug, Clone)]
enum ProductPages {
    /// Fixed pages; the last one reports no next page.
    Fixed(Vec<Vec<Value>>),
    /// The same nodes on every page, always with a next page.
    Endless(Vec<Value>),
}

#[derive(Debug)]
struct FakeState {
    product_pages: ProductPages,
    warehouses: Vec<Value>,
    customer_uuid: Option<String>,
    access_token: Option<String>,
    token_errors: Vec<String>,
    failure: Option<(u16, String)>,
    graphql_errors: Vec<String>,
    /// One-based `warehouse_products` page answered with GraphQL errors.
    page_errors: Option<(usize, Vec<String>)>,
    delay: Duration,
    requests: Vec<RecordedRequest>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            product_pages: ProductPages::Fixed(Vec::new()),
            warehouses: Vec::new(),
            customer_uuid: None,
            access_token: None,
            token_errors: Vec::new(),
            failure: None,
            graphql_errors: Vec::new(),
            page_errors: None,
            delay: Duration::ZERO,
            requests: Vec::new(),
        }
    }
}

type SharedState = Arc<Mutex<FakeState>>;

/// In-process stand-in for the `ShipHero` GraphQL API.
pub struct FakeShipHero {
    addr: SocketAddr,
    state: SharedState,
}

impl FakeShipHero {
    /// Start the fake on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = SharedState::default();
        let app = Router::new()
            .route("/graphql", post(graphql))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake ShipHero");
        let addr = listener.local_addr().expect("Failed to read fake address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// GraphQL endpoint of the fake.
    ///
    /// # Panics
    ///
    /// Panics if the address does not form a valid URL.
    #[must_use]
    pub fn graphql_url(&self) -> Url {
        Url::parse(&format!("http://{}/graphql", self.addr)).expect("Invalid fake URL")
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("Fake ShipHero state poisoned")
    }

    /// Serve these `warehouse_products` pages in order.
    pub fn set_product_pages(&self, pages: Vec<Vec<Value>>) {
        self.lock().product_pages = ProductPages::Fixed(pages);
    }

    /// Serve `nodes` on every page and always report another page.
    pub fn set_endless_products(&self, nodes: Vec<Value>) {
        self.lock().product_pages = ProductPages::Endless(nodes);
    }

    pub fn set_warehouses(&self, warehouses: Vec<Value>) {
        self.lock().warehouses = warehouses;
    }

    /// UUID returned by the `uuid` query; `None` makes the lookup fail.
    pub fn set_customer_uuid(&self, uuid: Option<&str>) {
        self.lock().customer_uuid = uuid.map(String::from);
    }

    pub fn set_access_token(&self, token: &str) {
        self.lock().access_token = Some(token.to_string());
    }

    /// Mutation-level errors returned by `generateAccessToken`.
    pub fn set_token_errors(&self, messages: &[&str]) {
        self.lock().token_errors = messages.iter().map(|m| (*m).to_string()).collect();
    }

    /// Answer every request with this HTTP status and body.
    pub fn fail_with(&self, status: u16, body: &str) {
        self.lock().failure = Some((status, body.to_string()));
    }

    /// Answer every request with a 200 carrying these GraphQL errors.
    pub fn fail_with_graphql_errors(&self, messages: &[&str]) {
        self.lock().graphql_errors = messages.iter().map(|m| (*m).to_string()).collect();
    }

    /// Answer `warehouse_products` page `page` (one-based) with a 200 carrying
    /// these GraphQL errors; earlier pages are served normally.
    pub fn set_page_errors(&self, page: usize, messages: &[&str]) {
        self.lock().page_errors = Some((page, messages.iter().map(|m| (*m).to_string()).collect()));
    }

    /// Wait this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = delay;
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests for one operation.
    #[must_use]
    pub fn requests_for(&self, operation: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.operation == operation)
            .collect()
    }
}

async fn graphql(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let delay = state.lock().map(|s| s.delay).unwrap_or_default();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let Ok(mut state) = state.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let operation = body
        .get("operationName")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let variables = body.get("variables").cloned().unwrap_or(Value::Null);
    state.requests.push(RecordedRequest {
        operation: operation.clone(),
        variables: variables.clone(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from),
    });

    if let Some((status, body)) = &state.failure {
        let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, body.clone()).into_response();
    }
    if !state.graphql_errors.is_empty() {
        return graphql_errors(&state.graphql_errors);
    }

    let data = match operation.as_str() {
        "GetWarehouseProducts" => {
            let index = page_index(&variables);
            if let Some((_, messages)) = state
                .page_errors
                .as_ref()
                .filter(|(page, _)| *page == index + 1)
            {
                return graphql_errors(messages);
            }
            products_page(&state.product_pages, index)
        }
        "GetAccountWarehouses" => json!({
            "account": {
                "request_id": "req-warehouses",
                "complexity": 1,
                "data": { "warehouses": state.warehouses }
            }
        }),
        "GetCustomerUuid" => match &state.customer_uuid {
            Some(id) => json!({
                "uuid": {
                    "request_id": "req-uuid",
                    "data": { "legacy_id": variables.get("legacy_id"), "id": id }
                }
            }),
            None => {
                return Json(json!({ "errors": [{ "message": "Entity not found" }] }))
                    .into_response();
            }
        },
        "GenerateAccessToken" => {
            let errors: Vec<Value> = state
                .token_errors
                .iter()
                .map(|message| json!({ "message": message }))
                .collect();
            json!({
                "generateAccessToken": {
                    "access_token": state.access_token,
                    "errors": errors
                }
            })
        }
        other => {
            return (StatusCode::BAD_REQUEST, format!("unknown operation {other}")).into_response();
        }
    };

    Json(json!({ "data": data })).into_response()
}

fn graphql_errors(messages: &[String]) -> Response {
    let errors: Vec<Value> = messages
        .iter()
        .map(|message| json!({ "message": message, "locations": [{ "line": 1, "column": 1 }] }))
        .collect();
    Json(json!({ "data": null, "errors": errors })).into_response()
}

/// Cursors are `page-<n>`, where `n` is the index of the page they lead to.
fn page_index(variables: &Value) -> usize {
    variables
        .get("after")
        .and_then(Value::as_str)
        .and_then(|cursor| cursor.strip_prefix("page-"))
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(0)
}

fn products_page(pages: &ProductPages, index: usize) -> Value {
    let (nodes, has_next_page) = match pages {
        ProductPages::Fixed(pages) => (
            pages.get(index).cloned().unwrap_or_default(),
            index + 1 < pages.len(),
        ),
        ProductPages::Endless(nodes) => (nodes.clone(), true),
    };

    let edges: Vec<Value> = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| json!({ "node": node, "cursor": format!("edge-{index}-{i}") }))
        .collect();

    json!({
        "warehouse_products": {
            "request_id": format!("req-page-{index}"),
            "complexity": 51,
            "data": {
                "edges": edges,
                "pageInfo": {
                    "hasNextPage": has_next_page,
                    "endCursor": format!("page-{}", index + 1)
                }
            }
        }
    })
}

// =============================================================================
// Node builders
// =============================================================================

/// A dynamically slotted warehouse product.
///
/// Each location is `(location_id, location_name, quantity, pickable)`.
#[must_use]
pub fn slotted_node(sku: &str, warehouse_id: &str, locations: &[(&str, &str, i64, bool)]) -> Value {
    let locations: Vec<Value> = locations
        .iter()
        .map(|(id, name, quantity, pickable)| {
            json!({
                "location_id": id,
                "location_name": name,
                "quantity": quantity,
                "pickable": pickable
            })
        })
        .collect();

    json!({
        "id": format!("WP-{sku}-{warehouse_id}"),
        "sku": sku,
        "warehouse_id": warehouse_id,
        "warehouse_identifier": format!("{warehouse_id}-name"),
        "on_hand": 0,
        "inventory_bin": null,
        "active": true,
        "product": { "name": format!("Product {sku}"), "barcode": format!("{sku}-BC") },
        "locations": locations
    })
}

/// A statically slotted warehouse product.
#[must_use]
pub fn binned_node(sku: &str, warehouse_id: &str, bin: &str, on_hand: i64) -> Value {
    json!({
        "id": format!("WP-{sku}-{warehouse_id}"),
        "sku": sku,
        "warehouse_id": warehouse_id,
        "warehouse_identifier": format!("{warehouse_id}-name"),
        "on_hand": on_hand,
        "inventory_bin": bin,
        "active": true,
        "product": { "name": format!("Product {sku}"), "barcode": null },
        "locations": []
    })
}

// =============================================================================
// Dashboard
// =============================================================================

/// A dashboard instance serving on an ephemeral port.
pub struct TestDashboard {
    pub base_url: String,
    pub http: reqwest::Client,
}

impl TestDashboard {
    /// `GET` a path with the test bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(TEST_TOKEN)
            .send()
            .await
            .expect("Dashboard request failed")
    }

    /// `GET` a path and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self.get(path).await;
        let status = response.status();
        let body = response.json().await.expect("Dashboard returned non-JSON body");
        (status, body)
    }
}

/// Run the dashboard against `graphql_url`.
///
/// Pages are fetched without delay; `overrides` replace any other variable.
///
/// # Panics
///
/// Panics if the configuration is invalid or the listener cannot be bound.
pub async fn spawn_dashboard(graphql_url: &Url, overrides: &[(&str, &str)]) -> TestDashboard {
    let graphql_url = graphql_url.to_string();
    let config = DashboardConfig::from_source(|key| {
        if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
            return Some((*value).to_string());
        }
        match key {
            "SHIPHERO_GRAPHQL_URL" => Some(graphql_url.clone()),
            "BINSCOPE_PAGE_DELAY_MS" => Some("0".to_string()),
            _ => None,
        }
    })
    .expect("Invalid test configuration");

    let app = binscope_dashboard::build_app(
        AppState::new(config).expect("Failed to build dashboard state"),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind dashboard");
    let addr = listener.local_addr().expect("Failed to read dashboard address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestDashboard {
        base_url: format!("http://{addr}"),
        http: reqwest::Client::new(),
    }
}
