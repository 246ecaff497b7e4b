//! Configuration management for Clientele
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, ClienteleError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Longest request timeout accepted by [`Config::validate`]
const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Main configuration structure for Clientele
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the chat backend; endpoints are resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("clientele/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Include `system` messages when printing `/history`
    #[serde(default)]
    pub show_system_messages: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClienteleError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ClienteleError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("CLIENTELE_SERVER_URL") {
            self.server.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CLIENTELE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid CLIENTELE_TIMEOUT_SECONDS: {}", timeout);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            tracing::debug!("Using server override from CLI: {}", server);
            self.server.base_url = server.clone();
        }
    }

    /// Parsed backend base URL
    ///
    /// # Errors
    ///
    /// Returns `ClienteleError::Config` if `server.base_url` is not a valid
    /// http(s) URL
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.server.base_url).map_err(|e| {
            ClienteleError::Config(format!(
                "Invalid server.base_url '{}': {}",
                self.server.base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClienteleError::Config(format!(
                "server.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        Ok(url)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(
                ClienteleError::Config("server.base_url cannot be empty".to_string()).into(),
            );
        }

        self.base_url()?;

        if self.server.timeout_seconds == 0 {
            return Err(ClienteleError::Config(
                "server.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ClienteleError::Config(format!(
                "server.timeout_seconds must be less than or equal to {}",
                MAX_TIMEOUT_SECONDS
            ))
            .into());
        }

        Ok(())
    }
}
