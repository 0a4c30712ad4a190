//! Transport contract shared by every API method
//!
//! An API method builds its headers and JSON body, then hands them to a
//! [`Transport`]. The transport owns the connection pool and turns every
//! failure to complete the exchange into an [`InteractionError`]. Adding a new
//! API method means adding a method on the client, not a new transport.

use crate::config::ClientConfig;
use crate::error::{InteractionError, InteractionFailure};
use crate::{CloudPaymentsError, Result};
use async_trait::async_trait;
use http::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

/// Sends JSON requests to a remote API
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the parsed JSON response
    ///
    /// Any non-success status, network failure or non-JSON body is an error
    /// tagged with `service` and `interaction_method`.
    async fn post_json(
        &self,
        service: &'static str,
        interaction_method: &str,
        url: Url,
        headers: HeaderMap,
        body: Value,
    ) -> std::result::Result<Value, InteractionError>;
}

/// A client of one remote service, composed over a [`Transport`]
#[async_trait]
pub trait InteractionClient: Send + Sync {
    /// Service name used to tag errors
    const SERVICE: &'static str;

    /// The transport requests go through
    type Transport: Transport;

    /// Base URL every endpoint is resolved against
    fn base_url(&self) -> &Url;

    /// The transport requests go through
    fn transport(&self) -> &Self::Transport;

    /// Join the base URL and an endpoint path with exactly one slash
    fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url().clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    /// POST a JSON body to the service
    async fn post(
        &self,
        interaction_method: &str,
        url: Url,
        headers: HeaderMap,
        body: Value,
    ) -> std::result::Result<Value, InteractionError> {
        self.transport()
            .post_json(Self::SERVICE, interaction_method, url, headers, body)
            .await
    }
}

/// [`Transport`] over a pooled `reqwest` client
///
/// Clones share the pool and the connection limit.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    permits: Arc<Semaphore>,
}

impl HttpTransport {
    /// Create a transport from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_connections)
            .build()
            .map_err(|e| CloudPaymentsError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Number of requests that can start right now without waiting
    pub fn available_connections(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        service: &'static str,
        interaction_method: &str,
        url: Url,
        headers: HeaderMap,
        body: Value,
    ) -> std::result::Result<Value, InteractionError> {
        let fail = |failure| InteractionError::new(service, interaction_method, failure);

        let _permit = self.permits.acquire().await.map_err(|_| {
            fail(InteractionFailure::invalid_request("connection pool is closed"))
        })?;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| fail(classify(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(
                        service,
                        method = interaction_method,
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            warn!(
                service,
                method = interaction_method,
                status = status.as_u16(),
                "Request rejected"
            );
            return Err(InteractionError::status(
                service,
                interaction_method,
                status.as_u16(),
                body,
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fail(classify(e)).with_status(status.as_u16()))?;

        let parsed: Value = serde_json::from_slice(&bytes).map_err(|e| {
            fail(InteractionFailure::malformed_response(format!(
                "response is not JSON: {}",
                e
            )))
            .with_status(status.as_u16())
        })?;

        debug!(
            service,
            method = interaction_method,
            status = status.as_u16(),
            "Response received"
        );

        Ok(parsed)
    }
}

fn classify(error: reqwest::Error) -> InteractionFailure {
    if error.is_timeout() {
        InteractionFailure::Timeout
    } else {
        InteractionFailure::Http(error)
    }
}
