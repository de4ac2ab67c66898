//! Stripe webhook verification and event handling.
//!
//! Stripe signs webhook deliveries with an HMAC-SHA256 over
//! `"{timestamp}.{payload}"`, carried in the `Stripe-Signature` header as
//! `t=<unix>,v1=<hex>[,v1=<hex>...]`. Verification checks every `v1`
//! candidate in constant time and enforces a timestamp tolerance against
//! replays.

use crate::error::PaymentError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default replay tolerance, matching Stripe's SDK default.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Verifies a `Stripe-Signature` header against the raw request body.
///
/// `now` is the caller's clock (unix seconds); injected rather than read
/// here so verification is testable and deterministic.
pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), PaymentError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for element in signature_header.split(',') {
        match element.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| {
                    PaymentError::InvalidSignature("timestamp is not an integer".to_string())
                })?);
            }
            Some(("v1", value)) => candidates.push(value),
            // Older scheme versions (v0) and unknown elements are ignored.
            Some(_) => {}
            None => {
                return Err(PaymentError::InvalidSignature(
                    "malformed signature header element".to_string(),
                ))
            }
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| PaymentError::InvalidSignature("missing timestamp".to_string()))?;
    if candidates.is_empty() {
        return Err(PaymentError::InvalidSignature(
            "no v1 signatures present".to_string(),
        ));
    }

    if (now - timestamp).abs() > tolerance_secs {
        return Err(PaymentError::InvalidSignature(format!(
            "timestamp outside tolerance of {tolerance_secs}s"
        )));
    }

    for candidate in candidates {
        let Ok(candidate_bytes) = hex::decode(candidate) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| PaymentError::InvalidSignature(e.to_string()))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(&candidate_bytes).is_ok() {
            return Ok(());
        }
    }

    Err(PaymentError::InvalidSignature(
        "no signature matched".to_string(),
    ))
}

/// A parsed webhook event envelope.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Event type, e.g. `checkout.session.completed`.
    pub event_type: String,
    /// The `data.object` the event describes.
    pub object: serde_json::Value,
}

impl WebhookEvent {
    /// Parses the raw webhook body into an event envelope.
    pub fn parse(payload: &[u8]) -> Result<Self, PaymentError> {
        let value: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::InvalidPayload(e.to_string()))?;
        let event_type = value["type"]
            .as_str()
            .ok_or_else(|| PaymentError::InvalidPayload("missing event type".to_string()))?
            .to_string();
        Ok(Self {
            event_type,
            object: value["data"]["object"].clone(),
        })
    }
}

/// Processes a verified webhook event.
///
/// The platform keeps no subscription database; event handling is
/// observational. Subscription state is re-queried from Stripe on demand via
/// [`crate::StripeClient::subscription_status`].
pub fn process_event(event: &WebhookEvent) {
    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let email = event.object["customer_email"]
                .as_str()
                .or_else(|| event.object["customer_details"]["email"].as_str())
                .unwrap_or("<unknown>");
            let subscription = event.object["subscription"].as_str().unwrap_or("<none>");
            tracing::info!(email, subscription, "checkout completed");
        }
        "customer.subscription.updated" => {
            tracing::info!(
                subscription = event.object["id"].as_str().unwrap_or("<unknown>"),
                status = event.object["status"].as_str().unwrap_or("<unknown>"),
                "subscription updated"
            );
        }
        "customer.subscription.deleted" => {
            tracing::info!(
                subscription = event.object["id"].as_str().unwrap_or("<unknown>"),
                "subscription cancelled"
            );
        }
        "invoice.payment_failed" => {
            tracing::warn!(
                invoice = event.object["id"].as_str().unwrap_or("<unknown>"),
                "payment failed for invoice"
            );
        }
        other => {
            tracing::debug!(event_type = other, "ignoring unhandled Stripe event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"type":"checkout.session.completed","data":{"object":{}}}"#;

    fn sign(payload: &[u8], timestamp: i64, secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_verifies() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", sign(PAYLOAD, now, SECRET));
        assert!(verify_signature(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE_SECS, now).is_ok());
    }

    #[test]
    fn second_v1_candidate_is_accepted() {
        let now = 1_700_000_000;
        let header = format!(
            "t={now},v1={},v1={}",
            "00".repeat(32),
            sign(PAYLOAD, now, SECRET)
        );
        assert!(verify_signature(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE_SECS, now).is_ok());
    }

    #[test]
    fn wrong_secret_fails() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", sign(PAYLOAD, now, "other_secret"));
        let err =
            verify_signature(PAYLOAD, &header, SECRET, DEFAULT_TOLERANCE_SECS, now).unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature(_)));
    }

    #[test]
    fn tampered_payload_fails() {
        let now = 1_700_000_000;
        let header = format!("t={now},v1={}", sign(PAYLOAD, now, SECRET));
        let err = verify_signature(b"{}", &header, SECRET, DEFAULT_TOLERANCE_SECS, now)
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature(_)));
    }

    #[test]
    fn stale_timestamp_fails() {
        let signed_at = 1_700_000_000;
        let header = format!("t={signed_at},v1={}", sign(PAYLOAD, signed_at, SECRET));
        let err = verify_signature(
            PAYLOAD,
            &header,
            SECRET,
            DEFAULT_TOLERANCE_SECS,
            signed_at + DEFAULT_TOLERANCE_SECS + 1,
        )
        .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature(_)));
    }

    #[test]
    fn malformed_headers_fail() {
        let now = 1_700_000_000;
        for header in ["", "t=abc,v1=00", "v1=00", "t=1700000000", "nonsense"] {
            assert!(
                verify_signature(PAYLOAD, header, SECRET, DEFAULT_TOLERANCE_SECS, now).is_err(),
                "header should be rejected: {header}"
            );
        }
    }

    #[test]
    fn event_envelope_parses() {
        let body = br#"{
            "type": "customer.subscription.updated",
            "data": {"object": {"id": "sub_1", "status": "active"}}
        }"#;
        let event = WebhookEvent::parse(body).unwrap();
        assert_eq!(event.event_type, "customer.subscription.updated");
        assert_eq!(event.object["id"], "sub_1");
        process_event(&event);
    }

    #[test]
    fn garbage_payload_is_invalid() {
        assert!(matches!(
            WebhookEvent::parse(b"not json"),
            Err(PaymentError::InvalidPayload(_))
        ));
        assert!(matches!(
            WebhookEvent::parse(b"{}"),
            Err(PaymentError::InvalidPayload(_))
        ));
    }
}
