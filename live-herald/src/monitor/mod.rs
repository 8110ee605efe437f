//! Stream monitoring.
//!
//! The monitor is responsible for:
//! - Checking each watched channel's live status once per cycle
//! - Degrading failed checks to offline
//! - Driving each channel's notification state machine
//! - Composing and publishing announcements on offline-to-online edges

mod detector;
mod service;

pub use detector::StreamDetector;
pub use service::{CycleReport, StreamMonitor, StreamMonitorConfig};
