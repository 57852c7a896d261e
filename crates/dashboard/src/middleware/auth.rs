//! Bearer token extractor.
//!
//! Operators authenticate with their own `ShipHero` access token. The token is
//! forwarded to `ShipHero` untouched; the dashboard never stores it.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use secrecy::SecretString;

use crate::error::AppError;

/// `ShipHero` access token taken from the `Authorization: Bearer` header.
///
/// Rejects the request with 401 when the header is missing, uses another
/// scheme, or carries an empty token.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(BearerToken(token): BearerToken) -> impl IntoResponse {
///     // pass `&token` to the ShipHero client
/// }
/// ```
pub struct BearerToken(pub SecretString);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        parse_bearer(header)
            .map(|token| Self(SecretString::from(token)))
            .ok_or_else(|| AppError::Unauthorized("malformed bearer token".to_string()))
    }
}

/// Token part of a `Bearer <token>` header value. The scheme is case-insensitive.
fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;
    use secrecy::ExposeSecret;

    use super::*;

    async fn extract(header: Option<&str>) -> Result<BearerToken, AppError> {
        let mut builder = Request::builder().uri("/api/shiphero/warehouses");
        if let Some(header) = header {
            builder = builder.header(AUTHORIZATION, header);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        BearerToken::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer   abc "), Some("abc"));
        assert_eq!(parse_bearer("Basic abc"), None);
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer"), None);
    }

    #[tokio::test]
    async fn test_extracts_token() {
        let BearerToken(token) = extract(Some("Bearer sh-token")).await.unwrap();
        assert_eq!(token.expose_secret(), "sh-token");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let err = extract(None).await.err().unwrap();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let err = extract(Some("Token sh-token")).await.err().unwrap();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
