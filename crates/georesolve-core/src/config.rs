use crate::error::{GeocodingError, Result};
use crate::models::request::NAMESAKE_MAX_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3012";

pub const SERVER_URL_ENV: &str = "GEOSERVER_URL";
pub const NAMESAKE_LIMIT_ENV: &str = "GEORESOLVE_NAMESAKE_LIMIT";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Set by the caller in code
    Explicit,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Explicit => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the geocoding client
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub server_url: ConfigValue<String>,
    pub namesake_example_limit: ConfigValue<usize>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            server_url: ConfigValue::new(DEFAULT_SERVER_URL.to_string(), ConfigSource::Default),
            namesake_example_limit: ConfigValue::new(NAMESAKE_MAX_COUNT, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| GeocodingError::Config {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig = toml::from_str(&content).map_err(|e| GeocodingError::Config {
            key: "file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        if let Some(server_url) = file_config.server_url {
            self.server_url.update(server_url, ConfigSource::File);
        }

        if let Some(limit) = file_config.namesake_example_limit {
            self.namesake_example_limit.update(limit, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOSERVER_URL
        if let Ok(url) = env::var(SERVER_URL_ENV) {
            if url.trim().is_empty() {
                tracing::warn!("Ignoring empty {} value", SERVER_URL_ENV);
            } else {
                self.server_url.update(url, ConfigSource::Environment);
            }
        }

        // GEORESOLVE_NAMESAKE_LIMIT
        if let Ok(limit_str) = env::var(NAMESAKE_LIMIT_ENV) {
            match limit_str.parse::<usize>() {
                Ok(limit) => self.namesake_example_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected non-negative integer",
                    NAMESAKE_LIMIT_ENV,
                    limit_str
                ),
            }
        }

        self
    }

    /// Apply values set by the caller in code
    pub fn update_explicit(&mut self, overrides: ConfigOverrides) {
        if let Some(server_url) = overrides.server_url {
            self.server_url.update(server_url, ConfigSource::Explicit);
        }

        if let Some(limit) = overrides.namesake_example_limit {
            self.namesake_example_limit.update(limit, ConfigSource::Explicit);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("server_url".to_string(), (self.server_url.value.clone(), self.server_url.source));
        map.insert(
            "namesake_example_limit".to_string(),
            (self.namesake_example_limit.value.to_string(), self.namesake_example_limit.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    server_url: Option<String>,
    namesake_example_limit: Option<usize>,
}

/// Caller-provided configuration overrides
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub namesake_example_limit: Option<usize>,
}
