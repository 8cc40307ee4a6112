//! Client configuration from TOML and environment.
//!
//! KANJIDLE_CONFIG_PATH points at an optional TOML file; KANJIDLE_API_URL
//! overrides the API base URL either way. Missing or unparsable config
//! falls back to the built-in defaults (logged, never fatal).

use serde::Deserialize;
use tracing::{error, info};

fn default_api_url() -> String {
    "https://kanjidle.onecomp.one/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Puzzle API base URL, without the `/v1/...` path.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout for puzzle fetches.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Attempt to load `ClientConfig` from KANJIDLE_CONFIG_PATH. On any
/// parsing/IO error, returns None.
fn load_config_file() -> Option<ClientConfig> {
    let path = std::env::var("KANJIDLE_CONFIG_PATH").ok()?;
    match std::fs::read_to_string(&path) {
        Ok(s) => match toml::from_str::<ClientConfig>(&s) {
            Ok(cfg) => {
                info!(target: "kanjidle", %path, "Loaded client config (TOML)");
                Some(cfg)
            }
            Err(e) => {
                error!(target: "kanjidle", %path, error = %e, "Failed to parse TOML config");
                None
            }
        },
        Err(e) => {
            error!(target: "kanjidle", %path, error = %e, "Failed to read TOML config file");
            None
        }
    }
}

/// Build the effective configuration: file (if any), then env overrides.
pub fn load_config_from_env() -> ClientConfig {
    let mut cfg = load_config_file().unwrap_or_default();
    if let Ok(url) = std::env::var("KANJIDLE_API_URL") {
        cfg.api_url = url;
    }
    cfg
}
