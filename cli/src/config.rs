//! Connection and input settings for the admin CLI.
//!
//! Values are layered: YAML file, then environment, then command-line flags.
//!
//! # Example YAML
//!
//! ```yaml
//! api_url: https://api.example.com
//! token: s3cr3t
//! timeout_secs: 30
//! max_content_bytes: 1048576
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Duration;

use broadcast_client::{ApiError, ClientConfig, DEFAULT_TIMEOUT, ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BROADCAST_ADMIN_CONFIG";
/// Environment override for [`Config::api_url`].
pub const API_URL_ENV: &str = "BROADCAST_API_URL";
/// Environment override for [`Config::token`].
pub const TOKEN_ENV: &str = "BROADCAST_TOKEN";

/// Default cap on broadcast content read from stdin (1 MiB).
pub const DEFAULT_MAX_CONTENT_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// CLI configuration.
///
/// Missing keys fall back to [`Config::default`].
///
/// # Examples
///
/// ```
/// # use broadcast_admin_cli::Config;
/// let config = Config::default();
/// assert_eq!(config.content_limit(), Some(1024 * 1024));
/// assert!(config.api_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root URL.
    pub api_url: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
    /// Request timeout in seconds; `0` disables the timeout.
    pub timeout_secs: u64,
    /// Maximum stdin content size in bytes; `0` disables the cap.
    pub max_content_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written, or
    /// [`ConfigError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Applies environment overrides.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; empty values are
    /// ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_url = Some(url);
        }
        if let Some(token) = non_empty(TOKEN_ENV) {
            self.token = Some(token);
        }
    }

    /// Request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Stdin cap, or `None` when disabled.
    pub fn content_limit(&self) -> Option<u64> {
        (self.max_content_bytes > 0).then_some(self.max_content_bytes)
    }

    /// Builds the HTTP client settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorKind::Transport`] error when no API URL is configured.
    pub fn client_config(&self) -> Result<ClientConfig, ApiError> {
        let url = self.api_url.as_deref().ok_or_else(|| {
            ApiError::new(
                ErrorKind::Transport,
                format!(
                    "no API URL configured: set api_url in the config file, {API_URL_ENV} or --api-url"
                ),
            )
        })?;
        let mut config = ClientConfig::new(url);
        config.token = self.token.clone();
        config.timeout = self.request_timeout();
        Ok(config)
    }
}
