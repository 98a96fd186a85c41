//! Client configuration.
//!
//! A small TOML file pointing the client at the fleet backend. A missing
//! file is not an error; every field has a default matching the local
//! development setup.

use autodoc_core::{FleetError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_WS_BASE_URL: &str = "ws://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the fleet backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL for REST calls (login, booking).
    pub api_base_url: String,
    /// Base URL for the telemetry WebSocket.
    pub ws_base_url: String,
    /// Timeout applied to every REST request.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_base_url: DEFAULT_WS_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| FleetError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })
    }

    /// Default config location: `<config dir>/autodoc/config.toml`.
    pub fn default_location() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| FleetError::config("could not determine config directory"))?;
        Ok(base.join("autodoc").join("config.toml"))
    }

    /// Loads from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_location()?)
    }
}
