//! Provider lookup capability consumed by the analyzer

use crate::client::{map_reqwest_error, NetClient, NetConfig};
use async_trait::async_trait;
use hashscan_config::Config;
use hashscan_errors::{Error, NetworkError};
use hashscan_types::{FileReport, Hash};
use std::time::Duration;
use url::Url;

/// Raw outcome of one provider lookup, before classification
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResponse {
    pub status: u16,
    pub success: bool,
    /// Parsed body; only attempted for successful statuses and `None` when
    /// the body is absent or malformed
    pub body: Option<FileReport>,
}

impl LookupResponse {
    #[must_use]
    pub fn found(report: FileReport) -> Self {
        Self {
            status: 200,
            success: true,
            body: Some(report),
        }
    }

    #[must_use]
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            success: (200..300).contains(&status),
            body: None,
        }
    }
}

/// Look a hash up at the threat-intelligence provider
///
/// An `Err` means the call itself failed (transport, timeout, ...). Any
/// response the provider actually sent, including error statuses, is `Ok`.
#[async_trait]
pub trait LookupClient: Send + Sync {
    async fn lookup(&self, hash: &Hash) -> Result<LookupResponse, Error>;
}

/// VirusTotal v3 file lookups (`GET {base}/files/{hash}`)
#[derive(Clone)]
pub struct VirusTotalClient {
    net: NetClient,
    base_url: Url,
}

impl VirusTotalClient {
    /// Create a client against `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL that can carry
    /// path segments.
    pub fn new(net: NetClient, base_url: &str) -> Result<Self, Error> {
        let base_url =
            Url::parse(base_url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(base_url.to_string()).into());
        }
        Ok(Self { net, base_url })
    }

    /// Build the client from merged configuration
    ///
    /// The connection pool is sized to the analyzer's concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be resolved or the HTTP client
    /// or base URL are invalid.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let api_key = config.resolved_api_key()?;
        let net = NetClient::new(NetConfig {
            timeout: Duration::from_secs(config.api.timeout_secs),
            connect_timeout: Duration::from_secs(config.api.connect_timeout_secs),
            pool_max_idle_per_host: config.analyzer.concurrency_limit.max(1),
            api_key: Some(api_key),
            ..NetConfig::default()
        })?;
        Self::new(net, &config.api.base_url)
    }

    /// URL of the file object for `hash`
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot take path segments.
    pub fn file_url(&self, hash: &Hash) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| NetworkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("files")
            .push(hash.as_str());
        Ok(url)
    }
}

#[async_trait]
impl LookupClient for VirusTotalClient {
    async fn lookup(&self, hash: &Hash) -> Result<LookupResponse, Error> {
        let url = self.file_url(hash)?;
        let response = self.net.get(url.as_str()).await?;
        let status = response.status();

        if !status.is_success() {
            return Ok(LookupResponse::status_only(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| map_reqwest_error(&e))?;
        let body = serde_json::from_slice::<FileReport>(&bytes).ok();

        Ok(LookupResponse {
            status: status.as_u16(),
            success: true,
            body,
        })
    }
}
