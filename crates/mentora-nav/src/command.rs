//! Navigation command emission.
//!
//! A validated route is packaged as a small JSON payload and handed to a
//! [`CommandSink`] — the session's outbound data channel. The sink is passed
//! explicitly per call rather than held in process-global state, so each
//! voice session carries its own channel and sessions never interfere.
//!
//! "Delivered" means the payload was accepted by the transport send
//! primitive. Frontend receipt is not acknowledged and the emitter never
//! retries; a failed or absent channel degrades to `false` and the caller
//! composes an apologetic reply instead of surfacing a fault.

use crate::error::NavError;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Wire payload instructing the frontend to change its displayed page.
///
/// Serialized as `{"command":"navigate","route":"<path>"}`, UTF-8 encoded,
/// sent as an opaque binary message over the session's reliable channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCommand {
    /// Always the literal `"navigate"`.
    pub command: String,
    /// The destination path, e.g. `/lessons`.
    pub route: String,
}

impl NavigationCommand {
    /// Builds a navigate command for the given route path.
    pub fn navigate(route: impl Into<String>) -> Self {
        Self {
            command: "navigate".to_string(),
            route: route.into(),
        }
    }

    /// Encodes the command to its transport-neutral byte form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, NavError> {
        serde_json::to_vec(self).map_err(|e| NavError::Sink(e.to_string()))
    }
}

/// An outbound data channel bound to one live session.
///
/// Implementations request reliable, ordered delivery from the transport and
/// impose their own send timeout; the emitter treats timeout and transport
/// failure identically.
pub trait CommandSink {
    /// Publishes an opaque binary message to the remote participant channel.
    fn publish(
        &self,
        data: Vec<u8>,
    ) -> impl Future<Output = Result<(), NavError>> + Send;
}

/// Sends a navigation command for `route` over the given sink.
///
/// Returns whether the command was handed to the transport successfully.
/// A `None` sink is the expected "no session bound yet" condition, not an
/// error; it is logged and reported as not delivered.
pub async fn send_navigation<S: CommandSink>(sink: Option<&S>, route: &str) -> bool {
    let Some(sink) = sink else {
        tracing::warn!(route, "no session channel bound, navigation command dropped");
        return false;
    };

    let payload = match NavigationCommand::navigate(route).to_bytes() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(route, "failed to encode navigation command: {e}");
            return false;
        }
    };

    match sink.publish(payload).await {
        Ok(()) => {
            tracing::info!(route, "navigation command sent to frontend");
            true
        }
        Err(e) => {
            tracing::warn!(route, "failed to send navigation command: {e}");
            false
        }
    }
}

/// A [`CommandSink`] for testing purposes: captures published payloads in
/// memory and can be configured to fail every publish.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Every payload handed to [`CommandSink::publish`], in order.
    pub sent: std::sync::Mutex<Vec<Vec<u8>>>,
    /// When set, every publish fails with a transport error.
    pub fail: bool,
}

impl CommandSink for RecordingSink {
    fn publish(&self, data: Vec<u8>) -> impl Future<Output = Result<(), NavError>> + Send {
        let result = if self.fail {
            Err(NavError::Sink("transport unavailable".to_string()))
        } else {
            self.sent.lock().unwrap().push(data);
            Ok(())
        };
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_wire_shape() {
        let cmd = NavigationCommand::navigate("/lessons");
        let bytes = cmd.to_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["command"], "navigate");
        assert_eq!(value["route"], "/lessons");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_sink_is_not_delivered_and_does_not_panic() {
        let delivered = send_navigation::<RecordingSink>(None, "/lessons").await;
        assert!(!delivered);
    }

    #[tokio::test]
    async fn delivery_hands_exact_payload_to_sink() {
        let sink = RecordingSink::default();
        let delivered = send_navigation(Some(&sink), "/lessons").await;
        assert!(delivered);

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let value: serde_json::Value = serde_json::from_slice(&sent[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"command": "navigate", "route": "/lessons"})
        );
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_false() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let delivered = send_navigation(Some(&sink), "/quiz").await;
        assert!(!delivered);
        assert!(sink.sent.lock().unwrap().is_empty());
    }
}
