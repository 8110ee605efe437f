//! Notification channels.
//!
//! - Twitter (API v2, OAuth 1.0a user context)
//! - Generic webhooks (HTTP POST)
//! - Console (logs only, for dry runs)

mod console;
mod oauth;
mod twitter;
mod webhook;

pub use console::ConsoleChannel;
pub use oauth::OAuth1Credentials;
pub use twitter::{TwitterChannel, TwitterConfig};
pub use webhook::{WebhookChannel, WebhookConfig};

use async_trait::async_trait;

use super::events::Announcement;
use crate::Result;

/// Trait for notification channels.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Get the channel type name.
    fn channel_type(&self) -> &'static str;

    /// Check if the channel is enabled.
    fn is_enabled(&self) -> bool;

    /// Deliver an announcement through this channel.
    async fn send(&self, announcement: &Announcement) -> Result<()>;

    /// Check that the channel is reachable and its credentials are accepted,
    /// without publishing anything.
    async fn verify(&self) -> Result<()>;
}
