//! CloudPayments API client

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{InteractionError, InteractionFailure};
use crate::idempotency::{self, REQUEST_ID_HEADER};
use crate::interaction::{HttpTransport, InteractionClient, Transport};
use crate::types::{mask_cryptogram, ApiResponse, ChargeRequest};
use crate::Result;
use http::header::{InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use tracing::{debug, warn};
use url::Url;

/// Service name attached to every error
pub const SERVICE: &str = "CloudPayments";

const CHARGE: &str = "charge";
const CHARGE_PATH: &str = "payments/charge";

/// Client for the CloudPayments API
///
/// Holds the credentials and the transport for its whole lifetime. Calls do
/// not mutate the client, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct CloudPaymentsClient<T = HttpTransport> {
    credentials: Credentials,
    authorization: HeaderValue,
    base_url: Url,
    transport: T,
}

impl<T> std::fmt::Debug for CloudPaymentsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudPaymentsClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CloudPaymentsClient<HttpTransport> {
    /// Create a client for the production API
    pub fn new(public_id: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(
            Credentials::new(public_id, api_secret),
            ClientConfig::default(),
        )
    }

    /// Create a client with a custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(credentials, config.parsed_base_url()?, transport)
    }
}

impl<T: Transport> CloudPaymentsClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(credentials: Credentials, base_url: Url, transport: T) -> Result<Self> {
        let authorization = credentials.authorization_header()?;

        Ok(Self {
            credentials,
            authorization,
            base_url,
            transport,
        })
    }

    /// The public id requests are made with
    pub fn public_id(&self) -> &str {
        self.credentials.public_id()
    }

    /// Headers for one request, carrying its own idempotency key
    pub fn request_headers(
        &self,
        request_id: &str,
    ) -> std::result::Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(request_id)?);
        Ok(headers)
    }

    /// Pay with a card cryptogram
    ///
    /// Returns the provider's response unchanged whenever the HTTP exchange
    /// completes, including declines (`"Success": false`). Errors only when
    /// the exchange itself fails.
    pub async fn charge(&self, request: &ChargeRequest) -> Result<ApiResponse> {
        let request_id = idempotency::request_id(&request.amount, &request.card_cryptogram_packet);
        let url = self.endpoint_url(CHARGE_PATH);

        let headers = self.request_headers(&request_id).map_err(|e| {
            self.interaction_error(
                CHARGE,
                InteractionFailure::invalid_request(format!("invalid {}: {}", REQUEST_ID_HEADER, e)),
            )
        })?;

        let body = serde_json::to_value(request.body(self.public_id())).map_err(|e| {
            self.interaction_error(
                CHARGE,
                InteractionFailure::invalid_request(format!("body serialization failed: {}", e)),
            )
        })?;

        debug!(
            url = %url,
            request_id = %request_id,
            amount = %request.amount,
            ip_address = %request.ip_address,
            invoice_id = ?request.invoice_id,
            card_cryptogram_packet = %mask_cryptogram(&request.card_cryptogram_packet),
            "Sending charge"
        );

        let raw = self
            .post(CHARGE, url, headers, body)
            .await
            .map_err(|e| {
                warn!(request_id = %request_id, error = %e, "Charge failed");
                e
            })?;

        let response = ApiResponse::try_from(raw).map_err(|message| {
            warn!(request_id = %request_id, %message, "Charge response is malformed");
            self.interaction_error(CHARGE, InteractionFailure::malformed_response(message))
        })?;

        debug!(
            request_id = %request_id,
            success = response.success(),
            message = ?response.message(),
            "Charge completed"
        );

        Ok(response)
    }

    fn interaction_error(&self, method: &str, failure: InteractionFailure) -> InteractionError {
        InteractionError::new(Self::SERVICE, method, failure)
    }
}

impl<T: Transport> InteractionClient for CloudPaymentsClient<T> {
    const SERVICE: &'static str = SERVICE;
    type Transport = T;

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn transport(&self) -> &T {
        &self.transport
    }
}
