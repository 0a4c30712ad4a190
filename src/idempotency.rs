//! Idempotency keys for charge requests
//!
//! CloudPayments deduplicates requests carrying the same `X-Request-ID`.
//! The key is derived from the charge content rather than generated at
//! random, so a retried charge with the same amount and cryptogram is
//! recognised by the provider as the same payment.

use http::HeaderName;
use rust_decimal::Decimal;

/// Header carrying the idempotency key
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Derive the idempotency key for a charge
///
/// Lowercase hex MD5 of `"<amount> <card_cryptogram_packet>"`, with the
/// amount in [`canonical_amount`] form. Invoice id and description do not
/// take part.
pub fn request_id(amount: &Decimal, card_cryptogram_packet: &str) -> String {
    let digest = md5::compute(format!(
        "{} {}",
        canonical_amount(amount),
        card_cryptogram_packet
    ));
    hex::encode(digest.0)
}

/// Amount as it takes part in the idempotency key
///
/// Trailing zeros are dropped and whole amounts keep one decimal place, so
/// equal amounts always give the same text: `10`, `10.0` and `10.00` all
/// become `10.0`, `12345.60` becomes `12345.6`.
pub fn canonical_amount(amount: &Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}
