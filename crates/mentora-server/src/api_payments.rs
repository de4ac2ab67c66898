//! Payment gateway endpoints: checkout, webhook, subscription status.
//!
//! All four handlers are thin delegations to [`mentora_payments`]; the
//! webhook additionally verifies the `Stripe-Signature` header before the
//! payload is trusted.

use crate::api::ApiError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::HeaderMap,
    Json,
};
use mentora_payments::{
    process_event, verify_signature, CheckoutSessionDetail, PaymentError, SubscriptionStatus,
    WebhookEvent, DEFAULT_TOLERANCE_SECS,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::NotConfigured(_) => ApiError::InternalServerError(e.to_string()),
            PaymentError::Api { .. } => ApiError::BadRequest(e.to_string()),
            PaymentError::InvalidPayload(_) | PaymentError::InvalidSignature(_) => {
                ApiError::BadRequest(e.to_string())
            }
            PaymentError::Http(_) => {
                tracing::error!("stripe request failed: {e}");
                ApiError::InternalServerError(e.to_string())
            }
        }
    }
}

/// Request body for checkout session creation.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: String,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// Response body for checkout session creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub url: Option<String>,
    pub session_id: String,
}

/// Handler for `POST /api/create-checkout-session`.
pub async fn create_checkout_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    if request.price_id.is_empty() {
        return Err(ApiError::BadRequest("price_id is required".to_string()));
    }

    let session = state
        .stripe
        .create_checkout_session(&request.price_id, request.user_email.as_deref())
        .await?;

    Ok(Json(CheckoutResponse {
        url: session.url,
        session_id: session.id,
    }))
}

/// Handler for `POST /api/webhook`.
///
/// Verifies the webhook signature when a signing secret is configured; in
/// development without one, the payload is parsed directly.
pub async fn webhook_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if let Some(secret) = &state.stripe.config().webhook_secret {
        let signature = headers
            .get("stripe-signature")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::BadRequest("missing stripe-signature header".to_string()))?;

        verify_signature(
            &body,
            signature,
            secret,
            DEFAULT_TOLERANCE_SECS,
            chrono::Utc::now().timestamp(),
        )
        .map_err(|e| {
            tracing::error!("webhook signature verification failed: {e}");
            ApiError::BadRequest("invalid signature".to_string())
        })?;
    } else {
        tracing::warn!("no webhook secret configured; processing unverified Stripe event");
    }

    let event = WebhookEvent::parse(&body).map_err(|e| {
        tracing::error!("invalid webhook payload: {e}");
        ApiError::BadRequest("invalid payload".to_string())
    })?;

    tracing::info!(event_type = %event.event_type, "received Stripe event");
    process_event(&event);

    Ok(Json(json!({"status": "success"})))
}

/// Query parameters for subscription status lookup.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub email: String,
}

/// Handler for `GET /api/subscription-status`.
pub async fn subscription_status_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<SubscriptionStatus>, ApiError> {
    let status = state.stripe.subscription_status(&query.email).await?;
    Ok(Json(status))
}

/// Handler for `GET /api/checkout-session/{sessionId}`.
pub async fn checkout_session_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutSessionDetail>, ApiError> {
    let detail = state.stripe.checkout_session(&session_id).await?;
    Ok(Json(detail))
}
