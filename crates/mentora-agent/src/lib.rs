//! Agent-side glue for the Mentora voice tutor.
//!
//! Exposes the navigation subsystem to the external tool-calling agent
//! runtime: a fixed table of tool descriptors with JSON input schemas, the
//! per-session context that carries the live data channel, and the persona
//! instruction text.
//!
//! Speech recognition, synthesis, turn detection, and avatar rendering are
//! owned entirely by the external session provider; this crate only supplies
//! what the provider cannot know — which pages exist and how to reach them.

pub mod prompts;
pub mod session;
pub mod tools;

pub use session::SessionContext;
pub use tools::{
    dispatch, get_available_pages, navigate_to_page, navigation_tools, ToolDescriptor,
    GET_AVAILABLE_PAGES, NAVIGATE_TO_PAGE,
};
