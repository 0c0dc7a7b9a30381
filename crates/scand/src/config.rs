//! TOML configuration for scand
//!
//! Every section and key is optional; an absent file behaves like an empty
//! one.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use scan_api::config::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REQUEST_TIMEOUT};
use scan_api::ApiLimits;
use serde::Deserialize;

/// Listener and limit settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum duration of one request, in seconds
    pub request_timeout_secs: u64,
    /// Largest accepted upload, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Remote scanner settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendConfig {
    /// Scanner base URL; the environment takes precedence
    #[serde(default)]
    pub url: Option<String>,
}

/// Top-level scand configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScandConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

impl ScandConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;
        Self::from_toml_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Address to bind the listener to
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| format!("Invalid server.host '{}': {}", self.server.host, e))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Router limits derived from `[server]`
    pub fn limits(&self) -> ApiLimits {
        ApiLimits {
            max_upload_bytes: self.server.max_upload_bytes,
            request_timeout: Duration::from_secs(self.server.request_timeout_secs),
        }
    }
}
