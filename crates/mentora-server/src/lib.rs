//! Mentora server library logic.
//!
//! Assembles the HTTP surface of the platform backend: LiveKit join-token
//! issuance, Stripe checkout/webhook/status endpoints, and the YouTube
//! transcript fetcher. The navigation core never appears here — it runs in
//! the agent worker process next to the voice session.

pub mod api;
pub mod api_payments;
pub mod api_transcript;
pub mod config;

use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use mentora_payments::StripeClient;
use mentora_voice::VoiceService;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Timeout for outbound requests (YouTube pages, caption tracks).
const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Application state shared across all request handlers.
pub struct AppState {
    /// LiveKit room and token service.
    pub voice: Arc<VoiceService>,
    /// Stripe REST client.
    pub stripe: Arc<StripeClient>,
    /// Shared outbound HTTP client.
    pub http: reqwest::Client,
}

impl AppState {
    /// Builds the application state from loaded configuration.
    pub fn from_config(config: &config::Config) -> Self {
        Self {
            voice: Arc::new(VoiceService::new(config.livekit.clone())),
            stripe: Arc::new(StripeClient::new(config.stripe.clone())),
            http: reqwest::Client::builder()
                .timeout(HTTP_CLIENT_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

/// Builds the CORS layer from the configured origin list. `*` anywhere in
/// the list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Builds the application router with all routes.
pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(api::root_handler))
        .route("/health", get(api::health_handler))
        .route("/api/token", post(api::token_handler))
        .route(
            "/api/create-checkout-session",
            post(api_payments::create_checkout_handler),
        )
        .route("/api/webhook", post(api_payments::webhook_handler))
        .route(
            "/api/subscription-status",
            get(api_payments::subscription_status_handler),
        )
        .route(
            "/api/checkout-session/{sessionId}",
            get(api_payments::checkout_session_handler),
        )
        .route(
            "/api/youtube/transcript",
            post(api_transcript::transcript_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(Arc::new(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = config::Config::default();
        app(AppState::from_config(&config), &config.cors.allowed_origins)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_check_returns_healthy() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn root_banner_names_the_service() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "running");
    }

    #[tokio::test]
    async fn token_without_livekit_config_is_a_server_error() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("not configured"));
    }

    #[tokio::test]
    async fn token_with_livekit_config_is_issued() {
        let mut config = config::Config::default();
        config.livekit.url = "http://localhost:7880".to_string();
        config.livekit.api_key = "devkey".to_string();
        config.livekit.api_secret = "secret".to_string();
        let app = app(AppState::from_config(&config), &config.cors.allowed_origins);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/token?user_id=learner-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(!json["token"].as_str().unwrap().is_empty());
        assert_eq!(json["room"], "mentora-voice-agent");
        assert_eq!(json["url"], "http://localhost:7880");
    }

    #[tokio::test]
    async fn checkout_without_stripe_config_is_a_server_error() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/create-checkout-session")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"price_id":"price_pro"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn checkout_requires_price_id() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/create-checkout-session")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"price_id":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_with_secret_rejects_unsigned_payloads() {
        let mut config = config::Config::default();
        config.stripe.secret_key = "sk_test".to_string();
        config.stripe.webhook_secret = Some("whsec_test".to_string());
        let app = app(AppState::from_config(&config), &config.cors.allowed_origins);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"type":"checkout.session.completed","data":{"object":{}}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn webhook_without_secret_accepts_parsed_events() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"type":"invoice.payment_failed","data":{"object":{"id":"in_1"}}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
    }

    #[tokio::test]
    async fn transcript_rejects_invalid_urls() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/youtube/transcript")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"video_url":"https://example.com/nope"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Invalid YouTube URL"));
    }
}
