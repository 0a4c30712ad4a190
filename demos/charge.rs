//! Charge a card cryptogram once and print the outcome
//!
//! ```sh
//! RUST_LOG=cloudpayments=debug cargo run --example charge -- \
//!     <public_id> <api_secret> <amount> <cryptogram> [base_url]
//! ```

use cloudpayments::{ChargeOutcome, ChargeRequest, ClientConfig, CloudPaymentsClient, Credentials};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!("usage: charge <public_id> <api_secret> <amount> <cryptogram> [base_url]");
        std::process::exit(2);
    }

    let config = match args.get(4) {
        Some(base_url) => ClientConfig::new(base_url.as_str()),
        None => ClientConfig::default(),
    };
    let client = CloudPaymentsClient::with_config(Credentials::new(&args[0], &args[1]), config)?;

    let request = ChargeRequest::new(Decimal::from_str(&args[2])?, &args[3], "127.0.0.1")
        .with_description("Test charge");

    let response = client.charge(&request).await?;
    println!("{}", serde_json::to_string_pretty(response.as_value())?);

    match response.outcome()? {
        ChargeOutcome::Approved(transaction) => {
            println!("✅ Approved: transaction {}", transaction.transaction_id)
        }
        ChargeOutcome::Declined(transaction) => println!(
            "❌ Declined: {} ({:?})",
            transaction.reason.unwrap_or_default(),
            transaction.reason_code
        ),
        ChargeOutcome::Secure3dRequired(challenge) => {
            println!("🔐 3-D Secure required: {}", challenge.acs_url)
        }
        ChargeOutcome::Rejected { message } => {
            println!("❌ Rejected: {}", message.unwrap_or_default())
        }
    }

    Ok(())
}
