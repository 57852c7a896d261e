//! Unified error handling for the dashboard API.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::shiphero::ShipHeroError;

/// Application-level error type for the dashboard API.
#[derive(Debug, Error)]
pub enum AppError {
    /// `ShipHero` API operation failed.
    #[error("ShipHero error: {0}")]
    ShipHero(#[from] ShipHeroError),

    /// Missing or malformed credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The upstream fetch did not finish in time.
    #[error("Timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ShipHero(ShipHeroError::Api { status: 401 | 403, .. }) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::ShipHero(ShipHeroError::Api { status: 429, .. }) => StatusCode::TOO_MANY_REQUESTS,
            Self::ShipHero(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, details) = match self {
            Self::ShipHero(ShipHeroError::Api { status: 401 | 403, .. }) => (
                "ShipHero rejected the access token".to_string(),
                None,
            ),
            Self::ShipHero(ShipHeroError::Api { status: 429, .. }) => (
                "ShipHero rate limit reached, retry later".to_string(),
                None,
            ),
            Self::ShipHero(ShipHeroError::Api { status, body }) => (
                format!("ShipHero API error ({status})"),
                Some(serde_json::json!({ "status": status, "body": body })),
            ),
            Self::ShipHero(ShipHeroError::Query { message, errors }) => (
                message.clone(),
                (!errors.is_empty()).then(|| serde_json::json!({ "errors": errors })),
            ),
            Self::ShipHero(ShipHeroError::Http(_)) => ("Could not reach ShipHero".to_string(), None),
            // Don't expose internal error details to clients
            Self::Internal(_) => ("Internal server error".to_string(), None),
            _ => (self.to_string(), None),
        };

        ErrorBody {
            success: false,
            error,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}
