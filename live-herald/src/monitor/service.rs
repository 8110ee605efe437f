//! Stream monitor service implementation.
//!
//! The StreamMonitor owns the watched channels and runs polling cycles:
//! observe each channel, step its state machine, and announce it when the
//! state machine asks for a notification.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::detector::StreamDetector;
use crate::compose::{Composed, MessageComposer};
use crate::domain::{ChannelWatch, Observation};
use crate::notification::NotificationService;

/// Configuration for the stream monitor.
#[derive(Debug, Clone)]
pub struct StreamMonitorConfig {
    /// Delay between two channel checks within a cycle.
    pub channel_pacing: Duration,
    /// Delay between the end of one cycle and the start of the next.
    pub cycle_interval: Duration,
}

impl Default for StreamMonitorConfig {
    fn default() -> Self {
        Self {
            channel_pacing: Duration::from_secs(1),
            cycle_interval: Duration::from_secs(5 * 60),
        }
    }
}

/// Counters for one polling cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub checked: usize,
    pub online: usize,
    pub observation_errors: usize,
    pub rearmed: usize,
    pub notified: usize,
    pub suppressed: usize,
    pub publish_failures: usize,
    /// The cycle stopped early because of cancellation.
    pub cancelled: bool,
}

/// The stream monitor service.
pub struct StreamMonitor {
    channels: Vec<ChannelWatch>,
    detector: StreamDetector,
    composer: MessageComposer,
    notifier: NotificationService,
    config: StreamMonitorConfig,
}

impl StreamMonitor {
    pub fn new(
        channels: Vec<ChannelWatch>,
        detector: StreamDetector,
        composer: MessageComposer,
        notifier: NotificationService,
        config: StreamMonitorConfig,
    ) -> Self {
        Self {
            channels,
            detector,
            composer,
            notifier,
            config,
        }
    }

    pub fn channels(&self) -> &[ChannelWatch] {
        &self.channels
    }

    /// Run cycles until cancelled.
    pub async fn run(&mut self, cancel: CancellationToken) {
        info!(
            channels = self.channels.len(),
            platform = self.detector.platform(),
            interval = ?self.config.cycle_interval,
            "Stream monitor started"
        );

        loop {
            info!("Beginning checks");
            let report = self.run_cycle(&cancel).await;
            if report.cancelled {
                break;
            }

            info!(
                checked = report.checked,
                online = report.online,
                errors = report.observation_errors,
                notified = report.notified,
                "Cycle finished, waiting {:?}",
                self.config.cycle_interval
            );

            if !pause(self.config.cycle_interval, &cancel).await {
                break;
            }
        }

        info!("Stream monitor stopped");
    }

    /// Check every channel once, in roster order.
    pub async fn run_cycle(&mut self, cancel: &CancellationToken) -> CycleReport {
        let mut report = CycleReport::default();
        let count = self.channels.len();

        for idx in 0..count {
            if cancel.is_cancelled() {
                report.cancelled = true;
                return report;
            }

            self.check_channel(idx, &mut report).await;

            if idx + 1 < count && !pause(self.config.channel_pacing, cancel).await {
                report.cancelled = true;
                return report;
            }
        }

        report
    }

    async fn check_channel(&mut self, idx: usize, report: &mut CycleReport) {
        let Self {
            channels,
            detector,
            composer,
            notifier,
            ..
        } = self;
        let channel = &mut channels[idx];

        let observation = match detector.observe(channel).await {
            Ok(observation) => observation,
            Err(e) => {
                warn!(channel_id = %channel.channel_id, error = %e, "Check failed, treating as offline");
                report.observation_errors += 1;
                Observation::Offline
            }
        };

        report.checked += 1;
        if observation.is_online() {
            report.online += 1;
        }

        let transition = channel.observe(&observation);
        info!(
            "Checked: {} - {} - {}",
            channel.channel_id,
            observation.as_str(),
            transition.to
        );

        if transition.changed() && !transition.should_notify() {
            info!(
                "Channel gone offline, or just started up: {}",
                channel.display_name
            );
            report.rearmed += 1;
        }

        if !transition.should_notify() {
            return;
        }

        let Observation::Online { category, title } = &observation else {
            return;
        };

        let watch_url = detector.watch_url(channel);
        let announcement = match composer.compose(channel, category, title, &watch_url) {
            Composed::Message(announcement) => announcement,
            Composed::SuppressedByTestMarker => {
                info!(
                    channel_id = %channel.channel_id,
                    title = %title,
                    "Title carries the test marker, not announcing"
                );
                report.suppressed += 1;
                return;
            }
        };

        report.notified += 1;
        let published = notifier.publish(&announcement).await;
        if published.is_empty() {
            warn!(channel_id = %channel.channel_id, "No enabled notification channel");
        }
        report.publish_failures += published.failed.len();
    }
}

/// Sleep unless cancelled first. Returns `false` on cancellation.
async fn pause(duration: Duration, cancel: &CancellationToken) -> bool {
    if duration.is_zero() {
        return !cancel.is_cancelled();
    }

    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamMonitorConfig::default();
        assert_eq!(config.channel_pacing, Duration::from_secs(1));
        assert_eq!(config.cycle_interval, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_pause_respects_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(!pause(Duration::from_secs(3600), &cancel).await);
        assert!(!pause(Duration::ZERO, &cancel).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_elapses() {
        let cancel = CancellationToken::new();
        assert!(pause(Duration::from_secs(60), &cancel).await);
    }
}
