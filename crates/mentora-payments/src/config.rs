use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tiers the platform sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Premium,
    /// An active subscription on a price id this deployment does not know.
    Unknown,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Premium => "premium",
            Self::Unknown => "unknown",
        }
    }
}

fn default_frontend_url() -> String {
    "http://localhost:3081".to_string()
}

/// Stripe credentials and price table.
#[derive(Clone, Serialize, Deserialize)]
pub struct StripeConfig {
    #[serde(default, skip_serializing)]
    pub secret_key: String,
    /// Webhook signing secret. Optional in development; without it, webhook
    /// payloads are parsed unverified.
    #[serde(default, skip_serializing)]
    pub webhook_secret: Option<String>,
    #[serde(default)]
    pub price_id_pro: String,
    #[serde(default)]
    pub price_id_premium: String,
    /// Base URL the checkout success/cancel pages live under.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            webhook_secret: None,
            price_id_pro: String::new(),
            price_id_premium: String::new(),
            frontend_url: default_frontend_url(),
        }
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "[REDACTED]"))
            .field("price_id_pro", &self.price_id_pro)
            .field("price_id_premium", &self.price_id_premium)
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl StripeConfig {
    /// Maps a Stripe price id to the plan it sells.
    pub fn plan_for_price(&self, price_id: &str) -> Plan {
        if !self.price_id_pro.is_empty() && price_id == self.price_id_pro {
            Plan::Pro
        } else if !self.price_id_premium.is_empty() && price_id == self.price_id_premium {
            Plan::Premium
        } else {
            Plan::Unknown
        }
    }
}
