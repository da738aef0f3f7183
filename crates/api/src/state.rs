use std::sync::Arc;

use figbridge_core::error::CoreError;
use figbridge_design::FigmaApi;
use figbridge_relay::Relay;

use crate::config::ServerConfig;
use crate::error::AppResult;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Queues, pending operations and host records.
    pub relay: Arc<Relay>,
    /// Design-data API client, present only when an access token is set.
    pub figma: Option<Arc<FigmaApi>>,
}

impl AppState {
    /// Build state from configuration: a fresh relay using the configured
    /// command timeout, and an API client if a token is available.
    pub fn new(config: ServerConfig) -> Self {
        let relay = Arc::new(Relay::new(config.command_timeout()));
        let figma = config
            .figma_access_token
            .as_ref()
            .map(|token| Arc::new(FigmaApi::new(config.figma_api_base.clone(), token.clone())));
        Self {
            config: Arc::new(config),
            relay,
            figma,
        }
    }

    /// The design-data API client, or `NotConfigured` if no token was set.
    pub fn figma(&self) -> AppResult<&FigmaApi> {
        self.figma.as_deref().ok_or_else(|| {
            CoreError::NotConfigured("FIGMA_ACCESS_TOKEN is not set".into()).into()
        })
    }
}
