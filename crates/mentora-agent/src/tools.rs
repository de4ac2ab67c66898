//! Tool adapter: the operations the agent runtime may invoke.
//!
//! Each tool is a static [`ToolDescriptor`] — name, description, JSON input
//! schema — registered in a fixed table at startup and dispatched by name.
//! There is no runtime signature synthesis; the schema is declarative and
//! the handlers are ordinary functions.
//!
//! Both tools return plain strings. Every failure state — resolver miss,
//! invalid target, unbound session, transport error — is converted to
//! user-facing natural language here; no structured error crosses this
//! boundary.

use crate::session::SessionContext;
use mentora_nav::{send_navigation, validate_path, CommandSink, NavError};
use serde_json::{json, Value};

/// A named operation with a declared input schema, invocable by the external
/// agent-orchestration runtime.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    /// Tool name, used for dispatch.
    pub name: &'static str,
    /// Description surfaced to the language model.
    pub description: &'static str,
    /// JSON-Schema-shaped input contract.
    pub input_schema: Value,
}

/// Name of the navigation tool.
pub const NAVIGATE_TO_PAGE: &str = "navigate_to_page";
/// Name of the page-listing tool.
pub const GET_AVAILABLE_PAGES: &str = "get_available_pages";

/// The fixed tool table registered with the agent runtime at session start.
pub fn navigation_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: NAVIGATE_TO_PAGE,
            description: "Navigate the user to a specific page on the platform. \
                          Use this when the user asks to go to a page, open a module, \
                          or access a feature.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "string",
                        "description": "The page to navigate to. Can be a route path \
                                        (e.g., '/dashboard') or a page name/keyword \
                                        (e.g., 'dashboard', 'lessons', 'quiz')"
                    }
                },
                "required": ["page"],
                "additionalProperties": false
            }),
        },
        ToolDescriptor {
            name: GET_AVAILABLE_PAGES,
            description: "Get a list of all available pages on the platform \
                          with their descriptions",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        },
    ]
}

/// Dispatches a tool invocation by name.
///
/// Returns `None` for an unknown tool name so the caller can fall through to
/// other tool providers.
pub async fn dispatch<S: CommandSink>(
    ctx: &SessionContext<S>,
    name: &str,
    arguments: &Value,
) -> Option<String> {
    match name {
        NAVIGATE_TO_PAGE => Some(navigate_to_page(ctx, arguments).await),
        GET_AVAILABLE_PAGES => Some(get_available_pages(ctx)),
        _ => None,
    }
}

/// Handles `navigate_to_page`.
///
/// Keywords are resolved to a path first; paths are validated against the
/// registry; the command is emitted over the session channel. Each failure
/// branch produces a complete spoken-style reply.
pub async fn navigate_to_page<S: CommandSink>(ctx: &SessionContext<S>, arguments: &Value) -> String {
    // The runtime may pass the destination as `page` or `route`.
    let requested = arguments["page"]
        .as_str()
        .or_else(|| arguments["route"].as_str())
        .unwrap_or("")
        .to_string();

    tracing::info!(page = %requested, "navigation requested");

    let path = if requested.starts_with('/') {
        requested.clone()
    } else {
        match ctx.registry().resolve(&requested) {
            Some(route) => {
                tracing::info!(path = %route.path, "resolved keyword to route");
                route.path.clone()
            }
            None => {
                return format!(
                    "I couldn't find a page matching '{requested}'. Try saying: \
                     dashboard, lessons, quiz, progress, jobs, or career."
                );
            }
        }
    };

    match validate_path(ctx.registry(), &path) {
        Ok(()) => {}
        Err(NavError::InvalidRoute(reason)) => return reason,
        Err(other) => return other.to_string(),
    }

    if send_navigation(ctx.sink(), &path).await {
        let name = ctx
            .registry()
            .find_by_path(&path)
            .map(|r| r.name.as_str())
            .unwrap_or(path.as_str());
        format!("Taking you to {name} now!")
    } else {
        "I tried to navigate but couldn't send the command. Please check the connection."
            .to_string()
    }
}

/// Handles `get_available_pages`: one line per registry entry, in registry
/// order.
pub fn get_available_pages<S: CommandSink>(ctx: &SessionContext<S>) -> String {
    let mut lines = Vec::new();
    for route in ctx.registry().routes() {
        lines.push(format!(
            "- {} ({}): {}",
            route.name, route.path, route.description
        ));
    }
    format!("Available pages:\n{}", lines.join("\n"))
}
