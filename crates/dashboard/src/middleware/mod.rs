//! HTTP middleware and extractors for the dashboard.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (record `x-request-id` in the span and Sentry scope)
//!
//! Authentication is per handler through the [`auth::BearerToken`] extractor.

pub mod auth;
pub mod request_id;

pub use auth::BearerToken;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
