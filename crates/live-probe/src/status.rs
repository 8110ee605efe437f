use async_trait::async_trait;

use crate::error::ProbeError;

/// Point-in-time status of a channel as reported by a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveStatus {
    /// The channel is broadcasting.
    Online {
        /// Game or category label. Empty when the platform reports none.
        category: String,
        /// Broadcast title. Empty when the platform reports none.
        title: String,
    },
    /// The channel is not broadcasting.
    Offline,
}

impl LiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveStatus::Online { .. } => "online",
            LiveStatus::Offline => "offline",
        }
    }
}

impl std::fmt::Display for LiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source of live status for channels on one platform.
#[async_trait]
pub trait LiveProbe: Send + Sync {
    /// Platform name, used in logs.
    fn platform(&self) -> &'static str;

    /// Public watch URL for a channel.
    fn watch_url(&self, channel_id: &str) -> String;

    /// Look up the current status of a channel.
    async fn check(&self, channel_id: &str) -> Result<LiveStatus, ProbeError>;
}
