//! Access token generation.
//!
//! `ShipHero` access tokens expire; operators trade their long-lived refresh
//! token for a fresh one through the `generateAccessToken` mutation. The
//! refresh token travels as a GraphQL variable and is never logged.

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::client::ShipHeroClient;
use super::queries::generate_access_token::GenerateAccessTokenGenerateAccessToken as TokenResult;
use super::queries::{GenerateAccessToken, generate_access_token};
use super::{GraphQLError, ShipHeroError};

/// Exchange a refresh token for a new access token.
///
/// # Errors
///
/// Returns `ShipHeroError::Query` if the mutation reports errors or returns
/// no token, and `ShipHeroError::Api` if `ShipHero` rejects the request.
#[instrument(skip_all)]
pub async fn generate_access_token(
    client: &ShipHeroClient,
    refresh_token: &SecretString,
) -> Result<SecretString, ShipHeroError> {
    let variables = generate_access_token::Variables {
        refresh_token: refresh_token.expose_secret().to_string(),
    };

    let data = client.execute::<GenerateAccessToken>(None, variables).await?;
    let result = data
        .generate_access_token
        .ok_or_else(|| ShipHeroError::invalid_response("missing generateAccessToken"))?;

    token_from_result(result)
}

fn token_from_result(
    result: TokenResult,
) -> Result<SecretString, ShipHeroError> {
    let errors: Vec<GraphQLError> = result
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|error| GraphQLError {
            message: error
                .message
                .unwrap_or_else(|| "Token generation failed".to_string()),
            locations: Vec::new(),
            path: Vec::new(),
        })
        .collect();
    if !errors.is_empty() {
        return Err(ShipHeroError::from_graphql_errors(errors));
    }

    result
        .access_token
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ShipHeroError::invalid_response("no access token returned"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn result(value: serde_json::Value) -> TokenResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_token_returned() {
        let token = token_from_result(result(serde_json::json!({
            "access_token": "new-access-token",
            "errors": []
        })))
        .unwrap();
        assert_eq!(token.expose_secret(), "new-access-token");
    }

    #[test]
    fn test_mutation_errors_become_query_error() {
        let err = token_from_result(result(serde_json::json!({
            "access_token": null,
            "errors": [{ "message": "Invalid refresh token" }]
        })))
        .unwrap_err();
        assert!(matches!(err, ShipHeroError::Query { .. }));
        assert_eq!(err.to_string(), "Invalid refresh token");
    }

    #[test]
    fn test_missing_token_is_invalid_response() {
        let err = token_from_result(result(serde_json::json!({ "access_token": "" }))).unwrap_err();
        assert!(err.to_string().contains("no access token"));
    }
}
