//! Renderer configuration.

use media_detect::DetectionStrategyId;
use networking::{default_user_agent, ClientConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
    /// User agent string.
    pub user_agent: String,
    /// Strategy identifier used when none is given.
    pub default_strategy: String,
    /// Request timeout in seconds. Unbounded when absent.
    pub request_timeout: Option<u64>,
    /// Connection timeout in seconds.
    pub connect_timeout: Option<u64>,
    /// Maximum redirects followed by probes.
    pub max_redirects: u32,
    /// Number of diagnostics kept in memory.
    pub diagnostics_capacity: usize,
}

impl RendererConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON configuration file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Set the default strategy.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.default_strategy = strategy.into();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = Some(seconds);
        self
    }

    /// Set user agent.
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// HTTP client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.request_timeout.map(Duration::from_secs),
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            default_strategy: DetectionStrategyId::default().as_str().to_string(),
            request_timeout: None,
            connect_timeout: None,
            max_redirects: 20,
            diagnostics_capacity: 1000,
        }
    }
}
