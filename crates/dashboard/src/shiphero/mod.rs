//! `ShipHero` warehouse management API client.
//!
//! Provides read-only access to `ShipHero`'s GraphQL API for the bin-location
//! inventory views: warehouse products (paginated), warehouses, and customer
//! account lookups for 3PL operators.
//!
//! # Architecture
//!
//! - Credentials are never cached here: every call takes the caller's bearer
//!   token, usually forwarded from the incoming request
//! - Typed GraphQL operations implement `graphql_client::GraphQLQuery`
//! - Responses are validated into typed structs at this boundary; anything
//!   that does not fit becomes a query error instead of a panic
//! - Multi-page reads go through [`pagination::fetch_all_pages`]

pub mod account;
pub mod auth;
pub mod client;
pub mod inventory;
pub mod pagination;
pub mod queries;

pub use account::{CustomerAccount, CustomerResolution, Warehouse, WarehouseAddress};
pub use client::ShipHeroClient;
pub use inventory::{InventoryFilter, WarehouseProductsSource};
pub use pagination::{FetchOutcome, Page, PageSource, PaginationSettings, fetch_all_pages};

use serde::Serialize;
use thiserror::Error;

/// Maximum number of response body characters kept in an [`ShipHeroError::Api`].
pub const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors that can occur when interacting with the `ShipHero` API.
#[derive(Debug, Error)]
pub enum ShipHeroError {
    /// Transport failure before a response status was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `ShipHero` answered with a non-success status.
    #[error("ShipHero API {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated to [`MAX_ERROR_BODY_CHARS`].
        body: String,
    },

    /// The request succeeded but the payload reported errors or had an
    /// unexpected shape.
    #[error("{message}")]
    Query {
        /// First error message.
        message: String,
        /// Every error reported by the API (empty for shape errors).
        errors: Vec<GraphQLError>,
    },
}

/// A GraphQL error returned by the `ShipHero` API.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl ShipHeroError {
    /// Build an API error, truncating the body.
    #[must_use]
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }

    /// Build a query error from the errors list reported by the API.
    ///
    /// The first message becomes the headline; an empty list yields a generic one.
    #[must_use]
    pub fn from_graphql_errors(errors: Vec<GraphQLError>) -> Self {
        let message = errors
            .first()
            .map_or_else(|| "Unknown GraphQL error".to_string(), |e| e.message.clone());
        Self::Query { message, errors }
    }

    /// Build a query error for a payload that does not match the expected shape.
    #[must_use]
    pub fn invalid_response(detail: impl std::fmt::Display) -> Self {
        Self::Query {
            message: format!("Invalid response from ShipHero: {detail}"),
            errors: Vec::new(),
        }
    }

    /// Status code of an [`ShipHeroError::Api`] error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
