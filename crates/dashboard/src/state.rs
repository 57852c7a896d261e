//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::shiphero::client::DEFAULT_REQUEST_TIMEOUT;
use crate::shiphero::{ShipHeroClient, ShipHeroError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    shiphero: ShipHeroClient,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ShipHeroError::Http` if the HTTP client cannot be created.
    pub fn new(config: DashboardConfig) -> Result<Self, ShipHeroError> {
        let shiphero = ShipHeroClient::new(
            config.shiphero.graphql_url.clone(),
            DEFAULT_REQUEST_TIMEOUT,
        )?;
        Ok(Self::with_client(config, shiphero))
    }

    /// Build state around an existing client.
    #[must_use]
    pub fn with_client(config: DashboardConfig, shiphero: ShipHeroClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, shiphero }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn shiphero(&self) -> &ShipHeroClient {
        &self.inner.shiphero
    }
}
