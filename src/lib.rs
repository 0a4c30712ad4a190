//! # cloudpayments
//!
//! An async client for the [CloudPayments](https://developers.cloudpayments.ru/)
//! payment API.
//!
//! The client authenticates with HTTP Basic auth, attaches a content-derived
//! idempotency key to every charge and returns the provider's response
//! envelope unchanged. A declined payment is a normal response; only a failed
//! HTTP exchange is an error.
//!
//! ```rust,no_run
//! use cloudpayments::{ChargeOutcome, ChargeRequest, CloudPaymentsClient};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> cloudpayments::Result<()> {
//! let client = CloudPaymentsClient::new("pk_0000000000", "api-secret")?;
//!
//! let request = ChargeRequest::new(Decimal::new(10000, 1), "<cryptogram>", "11.62.215.130")
//!     .with_invoice_id("1234567")
//!     .with_description("Order 1234567");
//!
//! let response = client.charge(&request).await?;
//! match response.outcome() {
//!     Ok(ChargeOutcome::Approved(transaction)) => {
//!         println!("paid, transaction {}", transaction.transaction_id)
//!     }
//!     Ok(other) => println!("not paid: {:?}", other),
//!     Err(e) => println!("unrecognised response {}: {}", response.as_value(), e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod idempotency;
pub mod interaction;
pub mod types;

// Re-exports for convenience
pub use auth::Credentials;
pub use client::{CloudPaymentsClient, SERVICE};
pub use config::ClientConfig;
pub use error::{CloudPaymentsError, InteractionError, InteractionFailure, Result};
pub use interaction::{HttpTransport, InteractionClient, Transport};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
