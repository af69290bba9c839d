#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for hashscan
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded, sized for the provider's free quota)
//! - Configuration file (~/.config/hashscan/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use crate::core::{AnalyzerConfig, ApiConfig, ApiKeyEncoding, GeneralConfig, TestingConfig};

use base64::Engine as _;
use hashscan_errors::{ConfigError, Error};
use hashscan_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub testing: TestingConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("hashscan").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has mistyped fields.
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_from(|name| std::env::var(name).ok())
    }

    /// Merge values from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds a value that cannot be parsed.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        use crate::constants::{
            ENV_API_BASE_URL, ENV_API_KEY, ENV_COLOR, ENV_CONCURRENCY, ENV_MIN_CYCLE_MS,
            ENV_OUTPUT, ENV_SENTINEL_HASH, ENV_TEST_MODE,
        };

        if let Some(output) = lookup(ENV_OUTPUT) {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => return Err(invalid_value(ENV_OUTPUT, output)),
            };
        }

        if let Some(color) = lookup(ENV_COLOR) {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => return Err(invalid_value(ENV_COLOR, color)),
            };
        }

        // keys from the environment are always taken verbatim
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api.api_key = key;
            self.api.api_key_encoding = ApiKeyEncoding::Plain;
        }

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api.base_url = url;
        }

        if let Some(concurrency) = lookup(ENV_CONCURRENCY) {
            self.analyzer.concurrency_limit = concurrency
                .parse()
                .map_err(|_| invalid_value(ENV_CONCURRENCY, concurrency))?;
        }

        if let Some(cycle) = lookup(ENV_MIN_CYCLE_MS) {
            self.analyzer.min_cycle_duration_ms = cycle
                .parse()
                .map_err(|_| invalid_value(ENV_MIN_CYCLE_MS, cycle))?;
        }

        if let Some(test_mode) = lookup(ENV_TEST_MODE) {
            self.testing.enabled = parse_bool(&test_mode)
                .ok_or_else(|| invalid_value(ENV_TEST_MODE, test_mode))?;
        }

        if let Some(sentinel) = lookup(ENV_SENTINEL_HASH) {
            self.testing.sentinel_hash = sentinel;
        }

        Ok(())
    }

    /// Check cross-field constraints after all sources are merged
    ///
    /// # Errors
    ///
    /// Returns an error for a zero concurrency limit, an unparseable base URL,
    /// test mode without a sentinel, a missing API key outside test mode, or
    /// an API key that fails to decode.
    pub fn validate(&self) -> Result<(), Error> {
        if self.analyzer.concurrency_limit == 0 {
            return Err(invalid_value("analyzer.concurrency_limit", "0"));
        }

        url::Url::parse(&self.api.base_url)
            .map_err(|e| invalid_value("api.base_url", format!("{} ({e})", self.api.base_url)))?;

        if self.testing.enabled && self.testing.sentinel_hash.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "testing.sentinel_hash".to_string(),
            }
            .into());
        }

        let key = self.resolved_api_key()?;
        if key.trim().is_empty() && !self.testing.enabled {
            return Err(ConfigError::MissingField {
                field: "api.api_key".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The API key as it must be sent to the provider
    ///
    /// # Errors
    ///
    /// Returns an error if a base64-encoded key is not valid base64 or does
    /// not decode to UTF-8.
    pub fn resolved_api_key(&self) -> Result<String, Error> {
        match self.api.api_key_encoding {
            ApiKeyEncoding::Plain => Ok(self.api.api_key.clone()),
            ApiKeyEncoding::Base64 => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(self.api.api_key.trim())
                    .map_err(|e| invalid_value("api.api_key", format!("<redacted> ({e})")))?;
                String::from_utf8(bytes)
                    .map_err(|_| invalid_value("api.api_key", "<redacted> (not UTF-8)"))
                    .map(|key| key.trim().to_string())
            }
        }
    }

    /// Sentinel hash when test mode is active
    #[must_use]
    pub fn active_sentinel(&self) -> Option<&str> {
        let sentinel = self.testing.sentinel_hash.trim();
        (self.testing.enabled && !sentinel.is_empty()).then_some(sentinel)
    }
}

fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Error {
    ConfigError::InvalidValue {
        field: field.into(),
        value: value.into(),
    }
    .into()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
