use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Stripe credentials are missing from configuration.
    #[error("Stripe is not configured: {0}")]
    NotConfigured(String),

    /// Transport-level failure talking to the Stripe API.
    #[error("Stripe request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe returned a non-success status.
    #[error("Stripe API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The webhook payload was not valid JSON or missed required fields.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The webhook signature header was malformed or did not verify.
    #[error("invalid webhook signature: {0}")]
    InvalidSignature(String),
}
