//! Agent worker binary — binds the navigation tools to a live voice session.
//!
//! The external session provider owns speech, turn detection, and avatar
//! rendering; this worker owns what the provider cannot know: the route
//! registry, the tool table, and the data channel used to steer the
//! learner's browser. One worker serves one tutoring room; a restart binds
//! a fresh session context (last writer wins, no multiplexing).

use mentora_agent::{dispatch, navigation_tools, SessionContext};
use mentora_nav::{CommandSink, RouteRegistry};
use mentora_server::config;
use mentora_voice::{RoomDataChannel, VoiceService};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MENTORA_CONFIG_PATH").ok())
        .unwrap_or_else(|| "config.toml".to_string());

    let config = config::load_config(Some(&config_path))
        .expect("failed to load configuration — the worker cannot start without valid config");

    // stdout is the reply channel to the invoking runtime; logs go to stderr
    // so a log line can never be mistaken for a reply.
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = Arc::new(RouteRegistry::site());
    tracing::info!(routes = registry.routes().len(), "route registry loaded");

    for tool in navigation_tools() {
        tracing::info!(tool = tool.name, "navigation tool registered");
    }

    let voice = VoiceService::new(config.livekit.clone());
    if !voice.is_enabled() {
        tracing::error!(
            "LiveKit credentials are required for the agent worker; \
             set livekit.url/api_key/api_secret or the MENTORA_LIVEKIT_* variables"
        );
        std::process::exit(1);
    }

    let room = voice.room_name().to_string();
    // The room usually exists already (created when the first learner fetched
    // a token); creating it here makes worker startup order irrelevant.
    if let Err(e) = voice.create_room(&room).await {
        tracing::warn!(room = %room, "could not pre-create room: {e}");
    }

    let channel = RoomDataChannel::new(config.livekit.clone(), &room)
        .expect("LiveKit configuration was validated above");
    let session = SessionContext::new(registry, channel);
    tracing::info!(room = %room, "agent worker ready, session channel bound");

    // Tool invocations arrive as JSON lines on stdin, one per line:
    //   {"tool": "navigate_to_page", "arguments": {"page": "quiz"}}
    // The reply string goes to stdout for the invoking runtime to speak.
    // Replies are the only thing ever written to stdout.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) if !line.trim().is_empty() => {
                        if let Some(reply) = handle_invocation(&session, &line).await {
                            println!("{reply}");
                        }
                    }
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        tracing::info!("stdin closed, agent worker exiting");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("failed to read tool invocation: {e}");
                        break;
                    }
                }
            }
            () = &mut shutdown => break,
        }
    }

    tracing::info!("agent worker shut down");
}

/// Parses one invocation line and dispatches it to the tool table.
///
/// Returns the reply to write to stdout, or `None` when the line produced
/// nothing to say (malformed input, unknown tool).
async fn handle_invocation<S: CommandSink>(
    session: &SessionContext<S>,
    line: &str,
) -> Option<String> {
    let request: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("ignoring malformed tool invocation: {e}");
            return None;
        }
    };

    let Some(tool) = request["tool"].as_str() else {
        tracing::warn!("tool invocation is missing the 'tool' field");
        return None;
    };

    let reply = dispatch(session, tool, &request["arguments"]).await;
    if reply.is_none() {
        tracing::warn!(tool, "unknown tool requested");
    }
    reply
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentora_nav::RecordingSink;

    fn session() -> SessionContext<RecordingSink> {
        SessionContext::new(Arc::new(RouteRegistry::site()), RecordingSink::default())
    }

    #[tokio::test]
    async fn valid_invocation_yields_a_reply() {
        let session = session();
        let reply = handle_invocation(
            &session,
            r#"{"tool": "navigate_to_page", "arguments": {"page": "quiz"}}"#,
        )
        .await
        .unwrap();
        assert!(reply.contains("Quiz"), "reply: {reply}");
        assert_eq!(session.sink().unwrap().sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_and_unknown_invocations_yield_nothing() {
        let session = session();
        assert!(handle_invocation(&session, "not json").await.is_none());
        assert!(handle_invocation(&session, r#"{"arguments": {}}"#).await.is_none());
        assert!(
            handle_invocation(&session, r#"{"tool": "no_such_tool", "arguments": {}}"#)
                .await
                .is_none()
        );
        assert!(session.sink().unwrap().sent.lock().unwrap().is_empty());
    }
}
