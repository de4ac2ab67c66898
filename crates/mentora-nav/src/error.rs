use thiserror::Error;

/// Errors produced by the navigation subsystem.
///
/// None of these are fatal: every variant is converted to a user-facing
/// natural-language string before it crosses the tool boundary. The
/// navigation subsystem must never take down the surrounding voice session.
#[derive(Debug, Error)]
pub enum NavError {
    /// The proposed path is not a registered route.
    #[error("{0}")]
    InvalidRoute(String),

    /// The transport rejected or timed out on a command publish.
    #[error("command delivery failed: {0}")]
    Sink(String),
}
