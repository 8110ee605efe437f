use async_trait::async_trait;
use tracing::info;

use super::NotificationChannel;
use crate::Result;
use crate::notification::events::Announcement;

/// Logs announcements instead of publishing them.
#[derive(Debug, Default)]
pub struct ConsoleChannel;

#[async_trait]
impl NotificationChannel for ConsoleChannel {
    fn channel_type(&self) -> &'static str {
        "console"
    }

    fn is_enabled(&self) -> bool {
        true
    }

    async fn send(&self, announcement: &Announcement) -> Result<()> {
        info!(
            channel_id = %announcement.channel_id,
            chars = announcement.char_count(),
            fallback = announcement.used_fallback,
            "[dry-run] {}",
            announcement.text
        );
        Ok(())
    }

    async fn verify(&self) -> Result<()> {
        Ok(())
    }
}
