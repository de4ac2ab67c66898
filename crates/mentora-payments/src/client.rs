//! Thin Stripe REST client.
//!
//! The platform stores no payment state of its own: checkout sessions are
//! created on demand, and subscription status is looked up live by customer
//! email. Only the handful of endpoints the backend needs are wrapped.

use crate::config::{Plan, StripeConfig};
use crate::error::PaymentError;
use serde::{Deserialize, Serialize};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// A created Checkout Session the frontend should redirect to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// Live subscription state for one customer email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub has_subscription: bool,
    pub plan: Plan,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
}

impl SubscriptionStatus {
    fn none(reason: &str) -> Self {
        Self {
            has_subscription: false,
            plan: Plan::Free,
            status: reason.to_string(),
            current_period_end: None,
            cancel_at_period_end: None,
        }
    }
}

/// Checkout session detail shown on the payment success page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionDetail {
    pub customer_email: Option<String>,
    pub payment_status: Option<String>,
    pub subscription_id: Option<String>,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct List<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Customer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Subscription {
    status: String,
    current_period_end: i64,
    cancel_at_period_end: bool,
    items: List<SubscriptionItem>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItem {
    price: PriceRef,
}

#[derive(Debug, Deserialize)]
struct PriceRef {
    id: String,
}

/// Stateless client over the Stripe REST API.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: reqwest::Client,
    base_url: String,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            base_url: STRIPE_API_BASE.to_string(),
        }
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.secret_key.is_empty()
    }

    fn require_key(&self) -> Result<&str, PaymentError> {
        if self.config.secret_key.is_empty() {
            Err(PaymentError::NotConfigured(
                "secret key is not set".to_string(),
            ))
        } else {
            Ok(&self.config.secret_key)
        }
    }

    /// Creates a subscription-mode Checkout Session for the given price.
    pub async fn create_checkout_session(
        &self,
        price_id: &str,
        customer_email: Option<&str>,
    ) -> Result<CheckoutSession, PaymentError> {
        let key = self.require_key()?;
        let form = checkout_form_params(&self.config, price_id, customer_email);

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(key)
            .form(&form)
            .send()
            .await?;

        let session: CheckoutSession = deserialize_response(response).await?;
        tracing::info!(session_id = %session.id, "checkout session created");
        Ok(session)
    }

    /// Checks whether the customer behind `email` has an active subscription.
    ///
    /// Absent customer or absent active subscription are ordinary outcomes,
    /// reported as the free plan, not errors.
    pub async fn subscription_status(
        &self,
        email: &str,
    ) -> Result<SubscriptionStatus, PaymentError> {
        let key = self.require_key()?;

        let customers: List<Customer> = deserialize_response(
            self.http
                .get(format!("{}/v1/customers", self.base_url))
                .bearer_auth(key)
                .query(&[("email", email), ("limit", "1")])
                .send()
                .await?,
        )
        .await?;

        let Some(customer) = customers.data.into_iter().next() else {
            return Ok(SubscriptionStatus::none("no_customer"));
        };

        let subscriptions: List<Subscription> = deserialize_response(
            self.http
                .get(format!("{}/v1/subscriptions", self.base_url))
                .bearer_auth(key)
                .query(&[
                    ("customer", customer.id.as_str()),
                    ("status", "active"),
                    ("limit", "1"),
                ])
                .send()
                .await?,
        )
        .await?;

        let Some(subscription) = subscriptions.data.into_iter().next() else {
            return Ok(SubscriptionStatus::none("no_active_subscription"));
        };

        let plan = subscription
            .items
            .data
            .first()
            .map(|item| self.config.plan_for_price(&item.price.id))
            .unwrap_or(Plan::Unknown);

        Ok(SubscriptionStatus {
            has_subscription: true,
            plan,
            status: subscription.status,
            current_period_end: Some(subscription.current_period_end),
            cancel_at_period_end: Some(subscription.cancel_at_period_end),
        })
    }

    /// Retrieves checkout session detail for the payment success page.
    pub async fn checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionDetail, PaymentError> {
        let key = self.require_key()?;

        let response = self
            .http
            .get(format!(
                "{}/v1/checkout/sessions/{session_id}",
                self.base_url
            ))
            .bearer_auth(key)
            .query(&[("expand[]", "subscription"), ("expand[]", "customer")])
            .send()
            .await?;

        let value: serde_json::Value = deserialize_response(response).await?;
        Ok(parse_session_detail(&value))
    }
}

/// Form parameters for a subscription checkout session.
fn checkout_form_params(
    config: &StripeConfig,
    price_id: &str,
    customer_email: Option<&str>,
) -> Vec<(&'static str, String)> {
    let frontend = config.frontend_url.trim_end_matches('/');
    let mut form = vec![
        ("payment_method_types[0]", "card".to_string()),
        ("line_items[0][price]", price_id.to_string()),
        ("line_items[0][quantity]", "1".to_string()),
        ("mode", "subscription".to_string()),
        (
            "success_url",
            format!("{frontend}/payment-success?session_id={{CHECKOUT_SESSION_ID}}"),
        ),
        ("cancel_url", format!("{frontend}/payment-cancel")),
        ("metadata[platform]", "mentora".to_string()),
    ];
    if let Some(email) = customer_email {
        form.push(("customer_email", email.to_string()));
    }
    form
}

/// Extracts the success-page fields from a (possibly expanded) session object.
fn parse_session_detail(value: &serde_json::Value) -> CheckoutSessionDetail {
    // `subscription` is a bare id unless expansion was honored.
    let subscription_id = match &value["subscription"] {
        serde_json::Value::String(id) => Some(id.clone()),
        obj @ serde_json::Value::Object(_) => obj["id"].as_str().map(str::to_string),
        _ => None,
    };
    CheckoutSessionDetail {
        customer_email: value["customer_email"]
            .as_str()
            .or_else(|| value["customer_details"]["email"].as_str())
            .map(str::to_string),
        payment_status: value["payment_status"].as_str().map(str::to_string),
        subscription_id,
        amount_total: value["amount_total"].as_i64(),
        currency: value["currency"].as_str().map(str::to_string),
    }
}

async fn deserialize_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, PaymentError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["error"]["message"]
            .as_str()
            .unwrap_or("unknown error")
            .to_string();
        Err(PaymentError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StripeConfig {
        StripeConfig {
            secret_key: "sk_test".to_string(),
            webhook_secret: None,
            price_id_pro: "price_pro".to_string(),
            price_id_premium: "price_premium".to_string(),
            frontend_url: "http://localhost:3081/".to_string(),
        }
    }

    #[test]
    fn checkout_form_shape() {
        let form = checkout_form_params(&config(), "price_pro", Some("learner@example.com"));
        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("mode"), Some("subscription"));
        assert_eq!(get("line_items[0][price]"), Some("price_pro"));
        assert_eq!(get("line_items[0][quantity]"), Some("1"));
        assert_eq!(
            get("success_url"),
            Some("http://localhost:3081/payment-success?session_id={CHECKOUT_SESSION_ID}")
        );
        assert_eq!(get("cancel_url"), Some("http://localhost:3081/payment-cancel"));
        assert_eq!(get("customer_email"), Some("learner@example.com"));
    }

    #[test]
    fn checkout_form_omits_email_when_absent() {
        let form = checkout_form_params(&config(), "price_pro", None);
        assert!(form.iter().all(|(k, _)| *k != "customer_email"));
    }

    #[test]
    fn session_detail_handles_expanded_and_bare_subscription() {
        let expanded = serde_json::json!({
            "customer_details": {"email": "learner@example.com"},
            "payment_status": "paid",
            "subscription": {"id": "sub_42"},
            "amount_total": 999,
            "currency": "usd"
        });
        let detail = parse_session_detail(&expanded);
        assert_eq!(detail.customer_email.as_deref(), Some("learner@example.com"));
        assert_eq!(detail.subscription_id.as_deref(), Some("sub_42"));
        assert_eq!(detail.amount_total, Some(999));

        let bare = serde_json::json!({"subscription": "sub_7"});
        assert_eq!(
            parse_session_detail(&bare).subscription_id.as_deref(),
            Some("sub_7")
        );
    }

    #[tokio::test]
    async fn unconfigured_client_errors_without_network() {
        let client = StripeClient::new(StripeConfig::default());
        assert!(!client.is_enabled());
        let err = client
            .create_checkout_session("price_pro", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::NotConfigured(_)));
        let err = client.subscription_status("a@b.c").await.unwrap_err();
        assert!(matches!(err, PaymentError::NotConfigured(_)));
    }
}
