//! Account-level lookups: warehouses and customer account resolution.

use binscope_core::{CustomerAccountId, WarehouseId};
use secrecy::SecretString;
use serde::Serialize;
use tracing::instrument;

use super::client::ShipHeroClient;
use super::queries::get_account_warehouses::GetAccountWarehousesAccountDataWarehouses as WarehouseNode;
use super::queries::{
    GetAccountWarehouses, GetCustomerUuid, get_account_warehouses, get_customer_uuid,
};
use super::ShipHeroError;

/// A warehouse visible to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub legacy_id: Option<i64>,
    pub identifier: String,
    pub address: Option<WarehouseAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseAddress {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// How a customer account UUID was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerResolution {
    /// Returned by the `uuid` query.
    Lookup,
    /// Built locally from the legacy ID after the lookup failed.
    ManualUuid,
}

/// A customer account ID resolved from its legacy numeric ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerAccount {
    pub id: CustomerAccountId,
    pub legacy_id: i64,
    pub resolved_by: CustomerResolution,
}

/// List the warehouses of the authenticated account.
///
/// Entries without an ID are skipped.
///
/// # Errors
///
/// Returns `ShipHeroError` if the query fails.
#[instrument(skip_all)]
pub async fn list_warehouses(
    client: &ShipHeroClient,
    access_token: &SecretString,
) -> Result<Vec<Warehouse>, ShipHeroError> {
    let data = client
        .execute::<GetAccountWarehouses>(Some(access_token), get_account_warehouses::Variables)
        .await?;

    let warehouses = data
        .account
        .and_then(|account| account.data)
        .and_then(|data| data.warehouses)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(convert_warehouse)
        .collect();

    Ok(warehouses)
}

fn convert_warehouse(node: WarehouseNode) -> Option<Warehouse> {
    let id = WarehouseId::parse(node.id.as_deref()?).ok()?;
    Some(Warehouse {
        id,
        legacy_id: node.legacy_id,
        identifier: node.identifier.unwrap_or_default(),
        address: node.address.map(|address| WarehouseAddress {
            name: address.name,
            city: address.city,
            state: address.state,
        }),
    })
}

/// Resolve a legacy customer account ID to its `ShipHero` UUID.
///
/// When the lookup fails with a transport or query error, the UUID is built
/// locally with [`CustomerAccountId::from_legacy`]. Authentication and rate
/// limit failures are not masked.
///
/// # Errors
///
/// Returns `ShipHeroError::Api` if `ShipHero` rejects the request.
#[instrument(skip(client, access_token))]
pub async fn resolve_customer(
    client: &ShipHeroClient,
    access_token: &SecretString,
    legacy_id: i64,
) -> Result<CustomerAccount, ShipHeroError> {
    let looked_up = client
        .execute::<GetCustomerUuid>(Some(access_token), get_customer_uuid::Variables { legacy_id })
        .await
        .map(|data| {
            data.uuid
                .and_then(|uuid| uuid.data)
                .and_then(|data| data.id)
                .and_then(|id| CustomerAccountId::parse(&id).ok())
        });

    match looked_up {
        Ok(Some(id)) => Ok(CustomerAccount {
            id,
            legacy_id,
            resolved_by: CustomerResolution::Lookup,
        }),
        Ok(None) | Err(ShipHeroError::Query { .. } | ShipHeroError::Http(_)) => {
            tracing::warn!(legacy_id, "UUID lookup failed, building customer ID locally");
            Ok(CustomerAccount {
                id: CustomerAccountId::from_legacy(legacy_id),
                legacy_id,
                resolved_by: CustomerResolution::ManualUuid,
            })
        }
        Err(err) => Err(err),
    }
}
