//! Route resolution and navigation commands for the Mentora voice tutor.
//!
//! The voice agent can steer the learner's browser: a spoken request like
//! "take me to my lessons" is resolved against an immutable registry of
//! frontend routes, validated, packaged as a navigation command, and
//! delivered over the live session's data channel.
//!
//! # Core pieces
//!
//! - [`RouteRegistry`] — the fixed table of addressable pages, built once at
//!   startup, with deterministic iteration order
//! - [`RouteRegistry::resolve`] — permissive keyword matching from free text
//!   to a route (first match in registry order wins)
//! - [`validate_path`] — exact-string gate before any command leaves the
//!   process
//! - [`send_navigation`] — serializes the command and hands it to the
//!   session's [`CommandSink`], degrading to "not delivered" on any failure
//!
//! # Failure stance
//!
//! Nothing in this crate raises across the tool boundary. Lookup misses are
//! `None`, invalid targets carry a reason string, a missing session channel
//! or transport failure is reported as not-delivered. The surrounding voice
//! session stays alive no matter what the navigation layer encounters.

pub mod command;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod validate;

pub use command::{send_navigation, CommandSink, NavigationCommand, RecordingSink};
pub use error::NavError;
pub use registry::{Route, RouteCategory, RouteRegistry};
pub use validate::validate_path;
