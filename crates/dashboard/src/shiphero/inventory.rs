//! Warehouse product reads.
//!
//! Pages through `warehouse_products` for one customer account and converts
//! each node into a [`RawProductRecord`] for the inventory views.

use binscope_core::{CustomerAccountId, LocationEntry, RawProductRecord, WarehouseId};
use secrecy::SecretString;
use tracing::instrument;

use super::client::ShipHeroClient;
use super::pagination::{FetchOutcome, Page, PageSource, PaginationSettings, fetch_all_pages};
use super::queries::get_warehouse_products::GetWarehouseProductsWarehouseProductsDataEdgesNode as WarehouseProductNode;
use super::queries::{GetWarehouseProducts, get_warehouse_products};
use super::ShipHeroError;

/// Which warehouse products to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Customer account whose stock is read (required by `ShipHero` for 3PLs).
    pub customer_account_id: CustomerAccountId,
    /// Restrict to one warehouse.
    pub warehouse_id: Option<WarehouseId>,
    /// Restrict to one SKU.
    pub sku: Option<String>,
}

impl InventoryFilter {
    /// Filter on a customer account only.
    #[must_use]
    pub const fn for_customer(customer_account_id: CustomerAccountId) -> Self {
        Self {
            customer_account_id,
            warehouse_id: None,
            sku: None,
        }
    }

    fn variables(&self, first: i64, after: Option<&str>) -> get_warehouse_products::Variables {
        get_warehouse_products::Variables {
            customer_account_id: Some(self.customer_account_id.as_str().to_string()),
            warehouse_id: self.warehouse_id.as_ref().map(|id| id.as_str().to_string()),
            sku: self.sku.clone(),
            first: Some(first),
            after: after.map(String::from),
        }
    }
}

/// `warehouse_products` as a [`PageSource`].
pub struct WarehouseProductsSource<'a> {
    client: &'a ShipHeroClient,
    access_token: &'a SecretString,
    filter: &'a InventoryFilter,
}

impl<'a> WarehouseProductsSource<'a> {
    #[must_use]
    pub const fn new(
        client: &'a ShipHeroClient,
        access_token: &'a SecretString,
        filter: &'a InventoryFilter,
    ) -> Self {
        Self {
            client,
            access_token,
            filter,
        }
    }
}

impl PageSource for WarehouseProductsSource<'_> {
    type Record = RawProductRecord;

    async fn fetch_page(
        &self,
        first: i64,
        after: Option<&str>,
    ) -> Result<Page<RawProductRecord>, ShipHeroError> {
        let data = self
            .client
            .execute_optional::<GetWarehouseProducts>(
                Some(self.access_token),
                self.filter.variables(first, after),
            )
            .await?;

        Ok(data.map_or_else(Page::empty, page_from_response))
    }
}

/// Read every warehouse product matching `filter`.
///
/// # Errors
///
/// Returns the first `ShipHeroError` hit while paging.
#[instrument(skip(client, access_token), fields(customer_account_id = %filter.customer_account_id))]
pub async fn fetch_warehouse_products(
    client: &ShipHeroClient,
    access_token: &SecretString,
    filter: &InventoryFilter,
    settings: PaginationSettings,
) -> Result<FetchOutcome<RawProductRecord>, ShipHeroError> {
    let source = WarehouseProductsSource::new(client, access_token, filter);
    fetch_all_pages(&source, settings).await
}

fn page_from_response(data: get_warehouse_products::ResponseData) -> Page<RawProductRecord> {
    let Some(connection) = data.warehouse_products.and_then(|result| result.data) else {
        return Page::empty();
    };

    let records = connection
        .edges
        .into_iter()
        .flatten()
        .filter_map(|edge| edge.node)
        .filter_map(convert_node)
        .collect();

    let (has_next_page, end_cursor) = connection
        .page_info
        .map_or((false, None), |info| (info.has_next_page, info.end_cursor));

    Page {
        records,
        has_next_page,
        end_cursor,
    }
}

/// Nodes without a SKU carry nothing we can display and are dropped.
fn convert_node(node: WarehouseProductNode) -> Option<RawProductRecord> {
    let sku = node.sku.filter(|sku| !sku.is_empty())?;
    let (product_name, barcode) = node
        .product
        .map_or((None, None), |product| (product.name, product.barcode));

    let locations = node.locations.map(|locations| {
        locations
            .into_iter()
            .flatten()
            .filter_map(|location| {
                Some(LocationEntry {
                    location_id: location.location_id?,
                    location_name: location.location_name.unwrap_or_default(),
                    quantity: location.quantity.unwrap_or(0),
                    pickable: location.pickable.unwrap_or(false),
                })
            })
            .collect()
    });

    Some(RawProductRecord {
        product_name: product_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| sku.clone()),
        sku,
        barcode: barcode.filter(|barcode| !barcode.is_empty()),
        warehouse_identifier: node.warehouse_identifier.unwrap_or_default(),
        warehouse_id: node.warehouse_id,
        on_hand: node.on_hand,
        inventory_bin: node.inventory_bin,
        active: node.active,
        locations,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(value: serde_json::Value) -> get_warehouse_products::ResponseData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_variables_carry_filters_and_cursor() {
        let filter = InventoryFilter {
            customer_account_id: CustomerAccountId::parse("Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0").unwrap(),
            warehouse_id: Some(WarehouseId::parse("V2FyZWhvdXNlOjE=").unwrap()),
            sku: Some("SKU-1".to_string()),
        };

        let vars = filter.variables(50, Some("abc"));

        assert_eq!(vars.customer_account_id.as_deref(), Some("Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0"));
        assert_eq!(vars.warehouse_id.as_deref(), Some("V2FyZWhvdXNlOjE="));
        assert_eq!(vars.sku.as_deref(), Some("SKU-1"));
        assert_eq!(vars.first, Some(50));
        assert_eq!(vars.after.as_deref(), Some("abc"));
    }

    #[test]
    fn test_page_from_response_converts_nodes() {
        let page = page_from_response(response(serde_json::json!({
            "warehouse_products": {
                "request_id": "r1",
                "complexity": 51,
                "data": {
                    "edges": [
                        {
                            "node": {
                                "sku": "SKU-1",
                                "warehouse_id": "V2FyZWhvdXNlOjE=",
                                "warehouse_identifier": "Primary",
                                "on_hand": 9,
                                "active": true,
                                "product": { "name": "Coconut Water", "barcode": "0123" },
                                "locations": [
                                    { "location_id": "L1", "location_name": "A-1", "quantity": 4, "pickable": true },
                                    null,
                                    { "location_name": "orphan", "quantity": 1 }
                                ]
                            },
                            "cursor": "c1"
                        },
                        { "node": { "sku": "SKU-2", "inventory_bin": "B-2", "on_hand": 3 }, "cursor": "c2" },
                        { "node": { "sku": null }, "cursor": "c3" },
                        null
                    ],
                    "pageInfo": { "hasNextPage": true, "endCursor": "c3" }
                }
            }
        })));

        assert!(page.has_next_page);
        assert_eq!(page.end_cursor.as_deref(), Some("c3"));
        assert_eq!(page.records.len(), 2);

        let first = page.records.first().unwrap();
        assert_eq!(first.product_name, "Coconut Water");
        assert_eq!(first.barcode.as_deref(), Some("0123"));
        assert_eq!(first.warehouse_key(), "V2FyZWhvdXNlOjE=");
        assert_eq!(
            first.locations,
            Some(vec![LocationEntry {
                location_id: "L1".to_string(),
                location_name: "A-1".to_string(),
                quantity: 4,
                pickable: true,
            }])
        );

        let second = page.records.get(1).unwrap();
        assert_eq!(second.product_name, "SKU-2");
        assert_eq!(second.static_bin(), Some(("B-2", 3)));
        assert!(second.locations.is_none());
    }

    #[test]
    fn test_missing_connection_is_empty_last_page() {
        let page = page_from_response(response(serde_json::json!({ "warehouse_products": null })));
        assert!(page.records.is_empty());
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_missing_page_info_ends_walk() {
        let page = page_from_response(response(serde_json::json!({
            "warehouse_products": { "data": { "edges": [] } }
        })));
        assert!(!page.has_next_page);
        assert!(page.end_cursor.is_none());
    }
}
