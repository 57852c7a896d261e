//! GraphQL operation definitions for the `ShipHero` API.
//!
//! Uses `graphql_client` to generate typed variables and responses from the
//! documents under `graphql/shiphero/queries/`, checked against the reduced
//! schema in `graphql/shiphero/schema.graphql`.

use graphql_client::GraphQLQuery;

// =============================================================================
// Inventory queries
// =============================================================================

/// Warehouse products with per-location stock, one page at a time.
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/shiphero/schema.graphql",
    query_path = "graphql/shiphero/queries/inventory.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetWarehouseProducts;

// =============================================================================
// Account queries
// =============================================================================

/// Warehouses visible to the authenticated account.
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/shiphero/schema.graphql",
    query_path = "graphql/shiphero/queries/account.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetAccountWarehouses;

/// Convert a legacy customer account ID into its `ShipHero` UUID.
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/shiphero/schema.graphql",
    query_path = "graphql/shiphero/queries/account.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetCustomerUuid;

// =============================================================================
// Authentication
// =============================================================================

/// Exchange a refresh token for a new access token.
///
/// Neither side derives `Debug`: both carry a credential.
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/shiphero/schema.graphql",
    query_path = "graphql/shiphero/queries/auth.graphql",
    response_derives = "Clone"
)]
pub struct GenerateAccessToken;

impl std::fmt::Debug for generate_access_token::Variables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variables")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_products_body() {
        let body = GetWarehouseProducts::build_query(get_warehouse_products::Variables {
            customer_account_id: Some("Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0".to_string()),
            warehouse_id: None,
            sku: None,
            first: Some(50),
            after: None,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "GetWarehouseProducts");
        assert_eq!(json["variables"]["first"], 50);
        assert_eq!(
            json["variables"]["customer_account_id"],
            "Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0"
        );
        assert!(json["variables"]["after"].is_null());
        assert!(json["query"].as_str().unwrap().contains("warehouse_products("));
    }

    #[test]
    fn test_warehouse_products_tolerates_missing_page_info() {
        let data: get_warehouse_products::ResponseData = serde_json::from_value(serde_json::json!({
            "warehouse_products": {
                "request_id": "abc",
                "complexity": 101,
                "data": {
                    "edges": [
                        { "node": { "sku": "SKU-1", "locations": null }, "cursor": "c1" },
                        null
                    ]
                }
            }
        }))
        .unwrap();
        let connection = data.warehouse_products.unwrap().data.unwrap();
        assert_eq!(connection.edges.len(), 2);
        assert!(connection.page_info.is_none());
    }

    #[test]
    fn test_customer_uuid_body() {
        let body = GetCustomerUuid::build_query(get_customer_uuid::Variables { legacy_id: 88774 });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "GetCustomerUuid");
        assert_eq!(json["variables"]["legacy_id"], 88774);
        assert!(json["query"].as_str().unwrap().contains("entity: CustomerAccount"));
    }

    #[test]
    fn test_generate_token_reads_camel_case_field() {
        let data: generate_access_token::ResponseData = serde_json::from_value(serde_json::json!({
            "generateAccessToken": { "access_token": "fresh", "errors": [] }
        }))
        .unwrap();
        let result = data.generate_access_token.unwrap();
        assert_eq!(result.access_token.as_deref(), Some("fresh"));
    }

    #[test]
    fn test_generate_token_debug_redacts() {
        let vars = generate_access_token::Variables {
            refresh_token: "super-secret-refresh".to_string(),
        };
        let debug = format!("{vars:?}");
        assert!(!debug.contains("super-secret-refresh"));
    }
}
