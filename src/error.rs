//! Error types for the CloudPayments client

use thiserror::Error;

/// Result type alias for CloudPayments operations
pub type Result<T> = std::result::Result<T, CloudPaymentsError>;

/// Main error type for CloudPayments operations
///
/// A declined payment is not an error: it is a successful exchange whose
/// response body reports `"Success": false`.
#[derive(Error, Debug)]
pub enum CloudPaymentsError {
    /// The HTTP exchange with the provider did not complete
    #[error(transparent)]
    Interaction(#[from] InteractionError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CloudPaymentsError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status code of the failed interaction, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Interaction(e) => e.status_code,
            Self::Config { .. } => None,
        }
    }

    /// The interaction error, if this is one
    pub fn as_interaction(&self) -> Option<&InteractionError> {
        match self {
            Self::Interaction(e) => Some(e),
            Self::Config { .. } => None,
        }
    }
}

/// A failed exchange with a remote service, tagged with where it happened
#[derive(Error, Debug)]
#[error("{service} interaction `{method}` failed: {failure}")]
pub struct InteractionError {
    /// Name of the remote service, e.g. `CloudPayments`
    pub service: &'static str,
    /// Logical name of the API method, e.g. `charge`
    pub method: String,
    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,
    /// What went wrong
    #[source]
    pub failure: InteractionFailure,
}

impl InteractionError {
    /// Create an interaction error without a status code
    pub fn new(
        service: &'static str,
        method: impl Into<String>,
        failure: InteractionFailure,
    ) -> Self {
        Self {
            service,
            method: method.into(),
            status_code: None,
            failure,
        }
    }

    /// Attach the HTTP status code of the response
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Create an error for a non-success HTTP status
    pub fn status(
        service: &'static str,
        method: impl Into<String>,
        status_code: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::new(
            service,
            method,
            InteractionFailure::Status {
                status_code,
                body: body.into(),
            },
        )
        .with_status(status_code)
    }

    /// Whether the exchange failed because it took too long
    pub fn is_timeout(&self) -> bool {
        matches!(self.failure, InteractionFailure::Timeout)
    }
}

/// The kind of failure behind an [`InteractionError`]
#[derive(Error, Debug)]
pub enum InteractionFailure {
    /// The provider answered with a non-success HTTP status
    #[error("unexpected status {status_code}: {body}")]
    Status { status_code: u16, body: String },

    /// The request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The response body was not the JSON envelope the provider documents
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// The request could not be built
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl InteractionFailure {
    /// Create a malformed response failure
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an invalid request failure
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_context() {
        let error = InteractionError::status("CloudPayments", "charge", 401, "Unauthorized");

        assert_eq!(error.service, "CloudPayments");
        assert_eq!(error.method, "charge");
        assert_eq!(error.status_code, Some(401));

        let message = error.to_string();
        assert!(message.contains("CloudPayments"));
        assert!(message.contains("`charge`"));
        assert!(message.contains("401"));
    }

    #[test]
    fn test_status_code_through_top_level_error() {
        let error: CloudPaymentsError =
            InteractionError::status("CloudPayments", "charge", 500, "").into();
        assert_eq!(error.status_code(), Some(500));
        assert!(error.as_interaction().is_some());

        let config = CloudPaymentsError::config("bad url");
        assert_eq!(config.status_code(), None);
        assert!(config.to_string().contains("bad url"));
    }

    #[test]
    fn test_timeout_detection() {
        let error = InteractionError::new("CloudPayments", "charge", InteractionFailure::Timeout);
        assert!(error.is_timeout());
        assert_eq!(error.status_code, None);
    }
}
