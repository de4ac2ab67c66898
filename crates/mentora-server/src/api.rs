//! Core API handlers: service banner, health check, and LiveKit join tokens.

use crate::AppState;
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Handler for `GET /`.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Mentora AI Voice Agent Server",
        "status": "running"
    }))
}

/// Health check handler.
///
/// Returns `200 OK`. Used by load balancers, monitoring, and CI to verify
/// the server is running.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy"
    }))
}

/// Query parameters for token issuance.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// Identity of the joining participant. Defaults to "user".
    pub user_id: Option<String>,
}

/// Response body for token issuance.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed LiveKit join token.
    pub token: String,
    /// The LiveKit server URL the client should connect to.
    pub url: String,
    /// The room the token grants access to.
    pub room: String,
}

/// Handler for `POST /api/token`.
///
/// Issues a LiveKit join token for the shared tutoring room.
pub async fn token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, ApiError> {
    if !state.voice.is_enabled() {
        return Err(ApiError::InternalServerError(
            "LiveKit credentials not configured".to_string(),
        ));
    }

    let user_id = query.user_id.unwrap_or_else(|| "user".to_string());
    let room = state.voice.room_name().to_string();

    let token = state
        .voice
        .generate_join_token(&room, &user_id, &format!("User {user_id}"))
        .map_err(|e| {
            tracing::error!("error generating token: {e}");
            ApiError::InternalServerError(e.to_string())
        })?;

    Ok(Json(TokenResponse {
        token,
        url: state.voice.get_url().to_string(),
        room,
    }))
}
