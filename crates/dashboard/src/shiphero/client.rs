//! `ShipHero` GraphQL API client.
//!
//! Executes typed GraphQL operations against the `ShipHero` endpoint using a
//! bearer token supplied by the caller.

use std::sync::Arc;
use std::time::Duration;

use graphql_client::GraphQLQuery;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::{GraphQLError, GraphQLErrorLocation, ShipHeroError};

/// `ShipHero` GraphQL API endpoint.
pub const GRAPHQL_ENDPOINT: &str = "https://public-api.shiphero.com/graphql";

/// Default timeout for a single GraphQL request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `ShipHero` GraphQL API client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Authentication
///
/// The client holds no credentials. Each call takes the access token of the
/// operator making the request, so one client can serve many operators.
#[derive(Clone)]
pub struct ShipHeroClient {
    inner: Arc<ShipHeroClientInner>,
}

struct ShipHeroClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl ShipHeroClient {
    /// Create a client for the given GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ShipHeroError::Http` if the HTTP client cannot be built.
    pub fn new(endpoint: Url, request_timeout: Duration) -> Result<Self, ShipHeroError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ShipHeroClientInner { client, endpoint }),
        })
    }

    /// The GraphQL endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL operation that must return data.
    ///
    /// # Errors
    ///
    /// Returns `ShipHeroError::Api` on a non-success status.
    /// Returns `ShipHeroError::Query` if the response reports errors, has an
    /// unexpected shape, or carries no `data`.
    /// Returns `ShipHeroError::Http` on network failures.
    pub async fn execute<Q: GraphQLQuery>(
        &self,
        access_token: Option<&SecretString>,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShipHeroError> {
        self.execute_optional::<Q>(access_token, variables)
            .await?
            .ok_or_else(|| ShipHeroError::invalid_response("no data in response"))
    }

    /// Execute a GraphQL operation, returning `None` when the payload has no `data`.
    ///
    /// # Errors
    ///
    /// Same as [`ShipHeroClient::execute`], except a missing `data` is not an error.
    #[instrument(skip_all, fields(operation = tracing::field::Empty))]
    pub async fn execute_optional<Q: GraphQLQuery>(
        &self,
        access_token: Option<&SecretString>,
        variables: Q::Variables,
    ) -> Result<Option<Q::ResponseData>, ShipHeroError> {
        let body = Q::build_query(variables);
        tracing::Span::current().record("operation", body.operation_name);

        let mut request = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(token) = access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "ShipHero returned an error status");
            return Err(ShipHeroError::api(status.as_u16(), &text));
        }

        parse_response::<Q::ResponseData>(&text)
    }
}

/// Validate a GraphQL response body.
fn parse_response<T: serde::de::DeserializeOwned>(text: &str) -> Result<Option<T>, ShipHeroError> {
    let graphql_response: GraphQLResponse<T> =
        serde_json::from_str(text).map_err(ShipHeroError::invalid_response)?;

    // Check for GraphQL errors
    if let Some(errors) = graphql_response.errors
        && !errors.is_empty()
    {
        let converted_errors: Vec<GraphQLError> = errors
            .into_iter()
            .map(|e| GraphQLError {
                message: e.message,
                locations: e
                    .locations
                    .into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: l.line,
                        column: l.column,
                    })
                    .collect(),
                path: e.path,
            })
            .collect();
        return Err(ShipHeroError::from_graphql_errors(converted_errors));
    }

    Ok(graphql_response.data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Account {
        id: String,
    }

    #[test]
    fn test_client_creation() {
        let client =
            ShipHeroClient::new(Url::parse(GRAPHQL_ENDPOINT).unwrap(), DEFAULT_REQUEST_TIMEOUT)
                .unwrap();
        assert_eq!(client.endpoint().as_str(), GRAPHQL_ENDPOINT);
    }

    #[test]
    fn test_parse_response_data() {
        let parsed: Option<Account> = parse_response(r#"{"data": {"id": "QWNjb3VudDox"}}"#).unwrap();
        assert_eq!(parsed.unwrap().id, "QWNjb3VudDox");
    }

    #[test]
    fn test_parse_response_missing_data() {
        let parsed: Option<Account> = parse_response("{}").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parse_response_errors_win_over_data() {
        let err = parse_response::<Account>(
            r#"{
                "data": {"id": "QWNjb3VudDox"},
                "errors": [
                    {"message": "Not enough credits", "locations": [{"line": 2, "column": 3}]},
                    {"message": "Second"}
                ]
            }"#,
        )
        .unwrap_err();
        match err {
            ShipHeroError::Query { message, errors } => {
                assert_eq!(message, "Not enough credits");
                assert_eq!(errors.len(), 2);
                assert_eq!(errors.first().map(|e| e.locations.len()), Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_response_empty_errors_list_is_success() {
        let parsed: Option<Account> =
            parse_response(r#"{"data": {"id": "QWNjb3VudDox"}, "errors": []}"#).unwrap();
        assert!(parsed.is_some());
    }

    #[test]
    fn test_parse_response_invalid_shape() {
        let err = parse_response::<Account>(r#"{"data": {"id": 42}}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid response from ShipHero"));
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response::<Account>("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ShipHeroError::Query { .. }));
    }
}
