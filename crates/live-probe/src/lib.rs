//! Live status probes for streaming platforms.
//!
//! A probe answers a single question for one channel at one point in time:
//! is it live right now, and if so, under which category and title.

pub mod client;
pub mod error;
pub mod status;
pub mod twitch;

pub use client::{create_client_builder, default_client};
pub use error::ProbeError;
pub use status::{LiveProbe, LiveStatus};
pub use twitch::TwitchProbe;
