//! HTTP transport
//!
//! One GET per call against the monitoring API:
//! - Fixed per-request timeout
//! - Status classification into transport errors
//! - JSON body parsing
//!
//! Nothing is retried; a failure is returned to the caller as is.

use crate::error::{Error, Result};
use crate::params::redact;
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Issues GET requests and returns parsed JSON bodies
///
/// The session owns exactly one transport. Tests substitute their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn get_json(&self, url: &Url) -> Result<JsonValue>;
}

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// User agent sent when none is configured
pub fn default_user_agent() -> String {
    format!("solaredge-etl/{}", env!("CARGO_PKG_VERSION"))
}

/// reqwest-backed transport holding one connection pool
pub struct HttpTransport {
    client: Client,
    config: HttpClientConfig,
}

impl HttpTransport {
    /// Create a transport with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    fn timeout_error(&self) -> Error {
        Error::Timeout {
            timeout_ms: self.config.timeout.as_millis() as u64,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<JsonValue> {
        debug!(url = %redact(url), "Issuing HTTP request");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(self.timeout_error()),
            Err(e) => return Err(Error::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(self.timeout_error()),
            Err(e) => return Err(Error::Http(e)),
        };
        debug!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
