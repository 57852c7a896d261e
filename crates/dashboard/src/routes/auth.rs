//! Token generation endpoint.

use axum::{Json, Router, extract::State, routing::post};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::shiphero::{ShipHeroError, auth::generate_access_token};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/auth/generate-token", post(generate_token))
}

/// Request body for token generation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    pub refresh_token: Option<String>,
}

/// Response body for token generation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenResponse {
    pub access_token: String,
}

/// Exchange a `ShipHero` refresh token for an access token.
///
/// Mutation errors (e.g. an expired refresh token) are reported as 400.
///
/// # Errors
///
/// Returns 400 if the refresh token is missing or rejected, and a 5xx status
/// if `ShipHero` cannot be reached.
#[instrument(skip_all)]
pub async fn generate_token(
    State(state): State<AppState>,
    Json(body): Json<GenerateTokenRequest>,
) -> Result<Json<GenerateTokenResponse>, AppError> {
    let refresh_token = body
        .refresh_token
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| AppError::BadRequest("refreshToken is required".to_string()))?;

    let access_token = generate_access_token(state.shiphero(), &refresh_token)
        .await
        .map_err(|err| match err {
            ShipHeroError::Query { message, errors } if !errors.is_empty() => {
                AppError::BadRequest(message)
            }
            other => AppError::from(other),
        })?;

    tracing::info!("Generated ShipHero access token");

    Ok(Json(GenerateTokenResponse {
        access_token: access_token.expose_secret().to_string(),
    }))
}
