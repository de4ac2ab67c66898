//! Voice infrastructure for the Mentora platform.
//!
//! Integrates with LiveKit for WebRTC voice transport: join-token issuance
//! for learners joining the tutoring room, room lifecycle management over
//! the server API, and the reliable data channel the agent uses to steer
//! the learner's browser.
//!
//! Speech recognition, synthesis, turn detection, and avatar video are all
//! rendered by the external session provider; this crate stops at
//! credentials, rooms, and bytes on the data channel.

pub mod channel;
pub mod config;
pub mod error;
pub mod service;

pub use channel::RoomDataChannel;
pub use config::LiveKitConfig;
pub use error::VoiceError;
pub use service::VoiceService;
