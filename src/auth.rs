//! Request authentication
//!
//! CloudPayments authenticates every API call with HTTP Basic auth: the
//! public id is the user name and the API secret is the password.

use crate::{CloudPaymentsError, Result};
use base64::Engine;
use http::HeaderValue;

/// API credentials issued in the CloudPayments merchant dashboard
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_id: String,
    api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_id", &self.public_id)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from a public id and an API secret
    pub fn new(public_id: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            api_secret: api_secret.into(),
        }
    }

    /// The public id, also sent in request bodies as `PublicId`
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// The `Authorization` header value: `Basic base64("public_id:api_secret")`
    pub fn authorization(&self) -> String {
        basic_authorization(&self.public_id, &self.api_secret)
    }

    /// The `Authorization` header value, marked sensitive so it is not
    /// printed by `http`'s `Debug` impls
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.authorization()).map_err(|e| {
            CloudPaymentsError::config(format!("Credentials are not a valid header value: {}", e))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Build a Basic authorization value from a user name and password
pub fn basic_authorization(user: &str, password: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", user, password));
    format!("Basic {}", token)
}
