//! Application state: session store, puzzle client, and configuration.
//!
//! One `AppState` per embedding. The store stands in for the browser's
//! key-value database; the client is the only network surface.

use tracing::{info, instrument};

use crate::api::{FetchError, PuzzleClient};
use crate::config::{load_config_from_env, ClientConfig};
use crate::store::SessionStore;

pub struct AppState {
    pub store: SessionStore,
    pub client: PuzzleClient,
    pub config: ClientConfig,
}

impl AppState {
    /// Build state from env: load config, construct the puzzle client.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, FetchError> {
        Self::with_config(load_config_from_env())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, FetchError> {
        let client = PuzzleClient::new(&config)?;
        info!(target: "kanjidle", api_url = %config.api_url, "puzzle client ready");
        Ok(Self {
            store: SessionStore::new(),
            client,
            config,
        })
    }
}
