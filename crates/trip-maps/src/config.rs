//! Configuration for the Google Maps client
//!
//! The credential and endpoint are explicit values handed to
//! [`GoogleMapsClient::new`](crate::api::GoogleMapsClient::new). Environment
//! and file lookups only happen here, at startup.

use crate::error::{MapsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default Google Maps web services endpoint
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "GOOGLE_MAPS_BASE_URL";

/// Configuration for the maps provider
///
/// # Example
///
/// ```json
/// {
///   "apiKey": "${GOOGLE_MAPS_API_KEY}",
///   "baseUrl": "https://maps.googleapis.com/maps/api",
///   "timeoutSecs": 30,
///   "requestsPerSecond": 10
/// }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsConfig {
    /// Provider API key
    pub api_key: String,

    /// Base URL of the web services
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Client-side request rate limit
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

// Default functions for serde
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    10
}

impl fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

impl MapsConfig {
    /// Create a configuration with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            requests_per_second: default_requests_per_second(),
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> MapsConfigBuilder {
        MapsConfigBuilder::default()
    }

    /// Build from `GOOGLE_MAPS_API_KEY` and the optional `GOOGLE_MAPS_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Load configuration from a JSON file
    ///
    /// `${VAR}` and `$VAR` references in the key and base URL are expanded.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MapsError::ConfigError(format!("Failed to read config file: {e}")))?;

        let mut config: MapsConfig = serde_json::from_str(&content)
            .map_err(|e| MapsError::ConfigError(format!("Failed to parse config file: {e}")))?;

        config.api_key = resolve_env_string(&config.api_key)?;
        config.base_url = resolve_env_string(&config.base_url)?;

        config.validate()?;
        Ok(config)
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(MapsError::ConfigError(format!(
                "API key is required (set {API_KEY_ENV})"
            )));
        }

        url::Url::parse(&self.base_url).map_err(|e| {
            MapsError::ConfigError(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;

        if self.timeout_secs == 0 {
            return Err(MapsError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.requests_per_second == 0 {
            return Err(MapsError::ConfigError(
                "requests_per_second must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MapsConfig
#[derive(Debug, Default)]
pub struct MapsConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    requests_per_second: Option<u32>,
}

impl MapsConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the client-side rate limit
    pub fn requests_per_second(mut self, rate: u32) -> Self {
        self.requests_per_second = Some(rate);
        self
    }

    /// Fill the key and base URL from the environment where not already set
    pub fn with_env(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var(BASE_URL_ENV).ok();
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MapsConfig> {
        let config = MapsConfig {
            api_key: self.api_key.unwrap_or_default(),
            base_url: self.base_url.unwrap_or_else(default_base_url),
            timeout_secs: self.timeout_secs.unwrap_or_else(default_timeout),
            requests_per_second: self
                .requests_per_second
                .unwrap_or_else(default_requests_per_second),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Resolve environment variable references in strings
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn resolve_env_string(s: &str) -> Result<String> {
    let mut result = s.to_string();

    let re_braces = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| MapsError::ConfigError(e.to_string()))?;

    for cap in re_braces.captures_iter(s) {
        let var_name = &cap[1];
        let value = std::env::var(var_name).map_err(|_| {
            MapsError::ConfigError(format!("Environment variable not found: {var_name}"))
        })?;
        result = result.replace(&cap[0], &value);
    }

    let re_simple = regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)")
        .map_err(|e| MapsError::ConfigError(e.to_string()))?;

    for cap in re_simple.captures_iter(&result.clone()) {
        let var_name = &cap[1];
        let value = std::env::var(var_name).map_err(|_| {
            MapsError::ConfigError(format!("Environment variable not found: {var_name}"))
        })?;
        result = result.replace(&cap[0], &value);
    }

    Ok(result)
}
