use chrono::{DateTime, Utc};

use crate::domain::ChannelWatch;

/// A composed announcement for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub channel_id: String,
    pub display_name: String,
    pub watch_url: String,
    pub text: String,
    /// Whether the random pick was too long and the short template was used.
    pub used_fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(
        entry: &ChannelWatch,
        watch_url: impl Into<String>,
        text: impl Into<String>,
        used_fallback: bool,
    ) -> Self {
        Self {
            channel_id: entry.channel_id.clone(),
            display_name: entry.display_name.clone(),
            watch_url: watch_url.into(),
            text: text.into(),
            used_fallback,
            created_at: Utc::now(),
        }
    }

    /// Length as counted against the message limit.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
