//! Fan-out of announcements to the configured channels.

use tracing::{info, warn};

use super::channels::NotificationChannel;
use super::events::Announcement;
use crate::Error;

/// Outcome of publishing one announcement.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub delivered: Vec<&'static str>,
    pub failed: Vec<(&'static str, Error)>,
}

impl PublishReport {
    /// Nothing was attempted because no channel is enabled.
    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty() && self.failed.is_empty()
    }
}

/// Publishes announcements through every enabled channel.
#[derive(Default)]
pub struct NotificationService {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl NotificationService {
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    pub fn add_channel(&mut self, channel: Box<dyn NotificationChannel>) {
        self.channels.push(channel);
    }

    pub fn enabled_channels(&self) -> impl Iterator<Item = &dyn NotificationChannel> {
        self.channels
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| c.is_enabled())
    }

    pub fn has_enabled_channel(&self) -> bool {
        self.enabled_channels().next().is_some()
    }

    /// Send once through each enabled channel.
    ///
    /// Failures are logged and collected; there are no retries.
    pub async fn publish(&self, announcement: &Announcement) -> PublishReport {
        let mut report = PublishReport::default();

        for channel in self.enabled_channels() {
            match channel.send(announcement).await {
                Ok(()) => {
                    info!(
                        via = channel.channel_type(),
                        channel_id = %announcement.channel_id,
                        fallback = announcement.used_fallback,
                        "Announcement sent: {}",
                        announcement.text
                    );
                    report.delivered.push(channel.channel_type());
                }
                Err(e) => {
                    warn!(
                        via = channel.channel_type(),
                        channel_id = %announcement.channel_id,
                        error = %e,
                        "Announcement failed"
                    );
                    report.failed.push((channel.channel_type(), e));
                }
            }
        }

        report
    }

    /// Verify every configured channel, enabled or not.
    pub async fn verify_all(&self) -> Vec<(&'static str, crate::Result<()>)> {
        let mut results = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            results.push((channel.channel_type(), channel.verify().await));
        }
        results
    }
}
