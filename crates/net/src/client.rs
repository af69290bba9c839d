//! HTTP client with a quota-sized connection pool

use hashscan_config::constants::API_KEY_HEADER;
use hashscan_errors::{Error, NetworkError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    /// Sized to the analyzer's lane count so lanes never queue on the pool
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    /// Injected as the `x-apikey` header on every request
    pub api_key: Option<String>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 4,
            user_agent: format!("hashscan/{}", env!("CARGO_PKG_VERSION")),
            api_key: None,
        }
    }
}

/// HTTP client wrapper
///
/// Requests are never retried here: every attempt spends provider quota, and
/// a failed hash is re-attempted by the next batch instead.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be encoded as a header value or
    /// if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref().filter(|key| !key.is_empty()) {
            let mut value =
                HeaderValue::from_str(key).map_err(|_| NetworkError::InvalidHeader {
                    header: API_KEY_HEADER.to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a single GET request
    ///
    /// # Errors
    ///
    /// Returns an error on timeouts, refused connections or any other
    /// transport failure. HTTP error statuses are not errors here.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))
    }
}

/// Convert a transport failure into the crate error taxonomy
pub(crate) fn map_reqwest_error(e: &reqwest::Error) -> Error {
    if e.is_timeout() {
        NetworkError::Timeout {
            url: e
                .url()
                .map(std::string::ToString::to_string)
                .unwrap_or_default(),
        }
        .into()
    } else if e.is_connect() {
        NetworkError::ConnectionRefused(e.to_string()).into()
    } else {
        NetworkError::RequestFailed(e.to_string()).into()
    }
}
