//! Configuration sections and their defaults

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CONCURRENCY_LIMIT, DEFAULT_MIN_CYCLE_DURATION_MS,
    DEFAULT_REFRESH_INTERVAL_SECS,
};
use hashscan_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

/// Quota shaping for the batch analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Lanes, and therefore lookups in flight
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
    /// Minimum time between the starts of two remote lookups on one lane
    #[serde(default = "default_min_cycle_duration_ms")]
    pub min_cycle_duration_ms: u64,
    /// Pause before the CLI re-runs hashes that ended in error
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            min_cycle_duration_ms: DEFAULT_MIN_CYCLE_DURATION_MS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl AnalyzerConfig {
    #[must_use]
    pub fn min_cycle_duration(&self) -> Duration {
        Duration::from_millis(self.min_cycle_duration_ms)
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// How `api.api_key` is stored in the configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyEncoding {
    #[default]
    Plain,
    Base64,
}

/// Remote provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_key_encoding: ApiKeyEncoding,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64, // seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64, // seconds
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: String::new(),
            api_key_encoding: ApiKeyEncoding::Plain,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Development switches; never enable against the real provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestingConfig {
    /// Report `sentinel_hash` as infected without calling the provider
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sentinel_hash: String,
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_concurrency_limit() -> usize {
    DEFAULT_CONCURRENCY_LIMIT
}

fn default_min_cycle_duration_ms() -> u64 {
    DEFAULT_MIN_CYCLE_DURATION_MS
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
