//! Outbound data channel for a live tutoring room.
//!
//! Navigation commands reach the frontend as opaque binary messages on the
//! room's reliable data channel. Publishing goes through the LiveKit server
//! API (`RoomService/SendData`) so the backend does not need to hold a
//! WebRTC participant connection of its own: the payload is base64-encoded
//! into the Twirp JSON body and delivered to every participant in the room.

use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use base64::Engine;
use livekit_api::access_token::{AccessToken, VideoGrants};
use mentora_nav::{CommandSink, NavError};
use std::future::Future;
use std::time::Duration;

/// Send timeout for a single data publish. Expiry surfaces as a failed
/// delivery, never a hang in the surrounding voice session.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A handle to one room's reliable data channel.
///
/// Constructed when a voice session starts and dropped with it; each session
/// owns its own channel instance.
#[derive(Debug, Clone)]
pub struct RoomDataChannel {
    config: LiveKitConfig,
    room: String,
    http: reqwest::Client,
}

impl RoomDataChannel {
    /// Binds a data channel to the named room.
    pub fn new(config: LiveKitConfig, room: impl Into<String>) -> Result<Self, VoiceError> {
        if config.url.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(VoiceError::Config(
                "LiveKit url, api_key and api_secret are required for a data channel".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| VoiceError::DataChannel(e.to_string()))?;
        Ok(Self {
            config,
            room: room.into(),
            http,
        })
    }

    /// The room this channel publishes into.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// The HTTP endpoint of the room service. LiveKit URLs are usually given
    /// with a `ws(s)` scheme; the server API speaks HTTP on the same host.
    fn send_data_endpoint(&self) -> String {
        let base = self.config.url.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("ws") {
            format!("http{rest}")
        } else {
            base.to_string()
        };
        format!("{base}/twirp/livekit.RoomService/SendData")
    }

    fn admin_token(&self) -> Result<String, VoiceError> {
        AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity("mentora-backend")
            .with_grants(VideoGrants {
                room_admin: true,
                room: self.room.clone(),
                ..Default::default()
            })
            .to_jwt()
            .map_err(VoiceError::LiveKit)
    }

    /// Publishes opaque bytes to every participant, reliable delivery.
    pub async fn publish_data(&self, data: &[u8]) -> Result<(), VoiceError> {
        let token = self.admin_token()?;
        let body = serde_json::json!({
            "room": self.room,
            "data": base64::engine::general_purpose::STANDARD.encode(data),
            "kind": "RELIABLE",
        });

        let response = self
            .http
            .post(self.send_data_endpoint())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceError::DataChannel(e.to_string()))?;

        if response.status().is_success() {
            tracing::debug!(room = %self.room, bytes = data.len(), "published data to room");
            Ok(())
        } else {
            Err(VoiceError::DataChannel(format!(
                "room service returned {} for room '{}'",
                response.status(),
                self.room
            )))
        }
    }
}

impl CommandSink for RoomDataChannel {
    fn publish(&self, data: Vec<u8>) -> impl Future<Output = Result<(), NavError>> + Send {
        async move {
            self.publish_data(&data)
                .await
                .map_err(|e| NavError::Sink(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LiveKitConfig {
        LiveKitConfig::new("wss://livekit.example.com", "devkey", "secret")
    }

    #[test]
    fn requires_credentials() {
        let result = RoomDataChannel::new(LiveKitConfig::default(), "room");
        assert!(matches!(result, Err(VoiceError::Config(_))));
    }

    #[test]
    fn endpoint_rewrites_ws_scheme_to_http() {
        let channel = RoomDataChannel::new(config(), "lesson-room").unwrap();
        assert_eq!(
            channel.send_data_endpoint(),
            "https://livekit.example.com/twirp/livekit.RoomService/SendData"
        );

        let plain = RoomDataChannel::new(
            LiveKitConfig::new("http://localhost:7880/", "devkey", "secret"),
            "r",
        )
        .unwrap();
        assert_eq!(
            plain.send_data_endpoint(),
            "http://localhost:7880/twirp/livekit.RoomService/SendData"
        );
    }

    #[test]
    fn admin_token_is_minted() {
        let channel = RoomDataChannel::new(config(), "lesson-room").unwrap();
        let token = channel.admin_token().unwrap();
        assert!(!token.is_empty());
    }
}
