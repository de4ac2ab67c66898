//! Per-session state for the voice agent.
//!
//! One [`SessionContext`] is constructed when a voice session starts and
//! dropped when it ends. The outbound data channel is owned by the context
//! and passed explicitly into every navigation call — there is no
//! process-wide room binding, so concurrent sessions each steer their own
//! frontend.

use mentora_nav::{CommandSink, RouteRegistry};
use std::sync::Arc;

/// Everything a tool invocation needs from the surrounding session.
#[derive(Debug)]
pub struct SessionContext<S: CommandSink> {
    registry: Arc<RouteRegistry>,
    sink: Option<S>,
}

impl<S: CommandSink> SessionContext<S> {
    /// Creates a context with a bound data channel.
    pub fn new(registry: Arc<RouteRegistry>, sink: S) -> Self {
        tracing::info!("session channel bound for navigation tools");
        Self {
            registry,
            sink: Some(sink),
        }
    }

    /// Creates a context with no channel bound yet.
    ///
    /// Navigation tools still resolve and validate in this state; command
    /// emission reports not-delivered. This is the expected condition between
    /// worker startup and the first session.
    pub fn unbound(registry: Arc<RouteRegistry>) -> Self {
        Self {
            registry,
            sink: None,
        }
    }

    /// The route registry shared across sessions.
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// The session's outbound channel, if one is bound.
    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentora_nav::RecordingSink;

    #[test]
    fn unbound_context_has_no_sink() {
        let ctx = SessionContext::<RecordingSink>::unbound(Arc::new(RouteRegistry::site()));
        assert!(ctx.sink().is_none());
        assert!(!ctx.registry().routes().is_empty());
    }

    #[test]
    fn bound_context_exposes_sink() {
        let ctx = SessionContext::new(Arc::new(RouteRegistry::site()), RecordingSink::default());
        assert!(ctx.sink().is_some());
    }
}
