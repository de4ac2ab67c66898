//! Stripe payment gateway integration for the Mentora platform.
//!
//! Handles subscription checkout sessions, webhook signature verification,
//! and live subscription status lookups. The platform keeps no payment
//! database: Stripe is the source of truth and is queried on demand.

pub mod client;
pub mod config;
pub mod error;
pub mod webhook;

pub use client::{CheckoutSession, CheckoutSessionDetail, StripeClient, SubscriptionStatus};
pub use config::{Plan, StripeConfig};
pub use error::PaymentError;
pub use webhook::{process_event, verify_signature, WebhookEvent, DEFAULT_TOLERANCE_SECS};
