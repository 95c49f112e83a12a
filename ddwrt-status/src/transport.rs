//! HTTP access to the router's web management interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Address used when none has been configured.
pub const PLACEHOLDER_ADDRESS: &str = "0.0.0.0";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of raw status page bodies.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Address of the router this fetcher talks to.
    fn target(&self) -> &str;

    /// Fetch the body served at `path`. An empty body is not an error.
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// Connection parameters for one router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Hostname or IP address.
    pub address: String,
    /// HTTP port.
    pub port: u16,
    /// Web interface user.
    pub username: String,
    /// Web interface password.
    pub password: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            address: PLACEHOLDER_ADDRESS.to_string(),
            port: 80,
            username: "admin".to_string(),
            password: "admin".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RouterOptions {
    /// Options for `address` with default credentials and timeout.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Set the web interface credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the HTTP port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the web interface.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

/// Whether `address` is unset or still the placeholder.
pub fn is_placeholder(address: &str) -> bool {
    let address = address.trim();
    address.is_empty() || address == PLACEHOLDER_ADDRESS
}

/// [`StatusFetcher`] over plain HTTP with Basic authentication.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    options: RouterOptions,
    base_url: String,
}

impl HttpFetcher {
    /// Build a fetcher for the given router.
    pub fn new(options: RouterOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("ddwrt-status/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::from_reqwest(options, client))
    }

    /// Build a fetcher around an existing client.
    pub fn from_reqwest(options: RouterOptions, client: reqwest::Client) -> Self {
        let base_url = options.base_url();
        Self {
            client,
            options,
            base_url,
        }
    }

    /// Override the base URL (e.g. to reach a non-standard scheme or a mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Connection options.
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }
}

#[async_trait]
impl StatusFetcher for HttpFetcher {
    fn target(&self) -> &str {
        &self.options.address
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Fetching status page");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.options.username, Some(&self.options.password))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        trace!(url = %url, bytes = body.len(), "Fetched status page");

        Ok(body)
    }
}
