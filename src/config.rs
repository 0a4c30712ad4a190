//! Client configuration

use crate::{CloudPaymentsError, Result};
use std::time::Duration;
use url::Url;

/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cloudpayments.ru/";

/// Default cap on simultaneous connections to the API
pub const DEFAULT_MAX_CONNECTIONS: usize = 30;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`crate::CloudPaymentsClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API
    pub base_url: String,
    /// Request timeout, covering connect, send and body read
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Maximum number of requests in flight at once
    pub max_connections: usize,
}

impl ClientConfig {
    /// Create a new config for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Set the connection limit
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;

        if self.timeout.is_zero() {
            return Err(CloudPaymentsError::config("Timeout must be greater than zero"));
        }

        if self.connect_timeout.is_zero() {
            return Err(CloudPaymentsError::config(
                "Connect timeout must be greater than zero",
            ));
        }

        if self.max_connections == 0 {
            return Err(CloudPaymentsError::config(
                "Connection limit must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Parse the base URL, checking it is an absolute http(s) URL
    pub fn parsed_base_url(&self) -> Result<Url> {
        if self.base_url.is_empty() {
            return Err(CloudPaymentsError::config("Base URL cannot be empty"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| CloudPaymentsError::config(format!("Invalid base URL: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CloudPaymentsError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
