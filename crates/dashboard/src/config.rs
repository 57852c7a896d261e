//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional. Operators authenticate per request with their
//! own `ShipHero` bearer token, so the server holds no credentials.
//!
//! ## Server
//! - `BINSCOPE_HOST` - Bind address (default: 127.0.0.1)
//! - `BINSCOPE_PORT` - Listen port (default: 3002)
//! - `BINSCOPE_LOG_JSON` - Emit JSON logs when set to `true` or `1`
//!
//! ## `ShipHero`
//! - `SHIPHERO_GRAPHQL_URL` - GraphQL endpoint (default: public API)
//! - `BINSCOPE_PAGE_SIZE` - Records per page (default: 50)
//! - `BINSCOPE_MAX_PAGES` - Page cap per fetch (default: 100)
//! - `BINSCOPE_PAGE_DELAY_MS` - Pause between pages (default: 500)
//! - `BINSCOPE_FETCH_TIMEOUT_SECS` - Budget for a whole inventory fetch (default: 300)
//! - `BINSCOPE_SLOTTED_SELLABLE` - `always` or `active` (default: always)
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use binscope_core::SlottedSellablePolicy;
use thiserror::Error;
use url::Url;

use crate::shiphero::PaginationSettings;
use crate::shiphero::pagination::DEFAULT_PAGE_DELAY_MS;
use crate::shiphero::client::GRAPHQL_ENDPOINT;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// `ShipHero` API configuration
    pub shiphero: ShipHeroConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// `ShipHero` API configuration.
#[derive(Debug, Clone)]
pub struct ShipHeroConfig {
    /// GraphQL endpoint
    pub graphql_url: Url,
    /// Page size, page cap and inter-page delay
    pub pagination: PaginationSettings,
    /// Upper bound on a full inventory fetch
    pub fetch_timeout: Duration,
    /// Sellable flag for dynamically slotted locations
    pub slotted_sellable: SlottedSellablePolicy,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or(&get, "BINSCOPE_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or(&get, "BINSCOPE_PORT", 3002_u16)?;
        let log_json = get("BINSCOPE_LOG_JSON")
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "TRUE" | "yes"));

        let shiphero = ShipHeroConfig::from_source(&get)?;

        let sentry_dsn = get("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());
        let sentry_environment = get("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.1);

        Ok(Self {
            host,
            port,
            log_json,
            shiphero,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShipHeroConfig {
    fn from_source(get: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = PaginationSettings::default();

        let graphql_url = parse_or_else(get, "SHIPHERO_GRAPHQL_URL", || {
            Url::parse(GRAPHQL_ENDPOINT)
        })?;
        let page_size: i64 = parse_or(get, "BINSCOPE_PAGE_SIZE", defaults.page_size)?;
        if page_size < 1 {
            return Err(ConfigError::InvalidEnvVar(
                "BINSCOPE_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let max_pages: u32 = parse_or(get, "BINSCOPE_MAX_PAGES", defaults.max_pages)?;
        if max_pages == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "BINSCOPE_MAX_PAGES".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let page_delay_ms: u64 = parse_or(get, "BINSCOPE_PAGE_DELAY_MS", DEFAULT_PAGE_DELAY_MS)?;
        let fetch_timeout_secs: u64 = parse_or(
            get,
            "BINSCOPE_FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?;
        let slotted_sellable = parse_or(
            get,
            "BINSCOPE_SLOTTED_SELLABLE",
            SlottedSellablePolicy::default(),
        )?;

        Ok(Self {
            graphql_url,
            pagination: PaginationSettings {
                page_size,
                max_pages,
                page_delay: Duration::from_millis(page_delay_ms),
            },
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            slotted_sellable,
        })
    }
}

/// Parse a variable, using `default` when it is unset or blank.
fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_or_else(get, key, || Ok::<T, T::Err>(default))
}

fn parse_or_else<T, F>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: F,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: FnOnce() -> Result<T, T::Err>,
{
    let result = match get(key).filter(|value| !value.trim().is_empty()) {
        Some(value) => value.trim().parse::<T>(),
        None => default(),
    };
    result.map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
