//! Individual stream detection.

use std::sync::Arc;
use std::time::Duration;

use live_probe::{LiveProbe, ProbeError};
use tracing::debug;

use crate::domain::{ChannelWatch, Observation};
use crate::{Error, Result};

/// Checks channels through a platform probe with a hard time bound.
#[derive(Clone)]
pub struct StreamDetector {
    probe: Arc<dyn LiveProbe>,
    timeout: Duration,
}

impl StreamDetector {
    pub fn new(probe: Arc<dyn LiveProbe>, timeout: Duration) -> Self {
        Self { probe, timeout }
    }

    pub fn platform(&self) -> &'static str {
        self.probe.platform()
    }

    pub fn watch_url(&self, channel: &ChannelWatch) -> String {
        self.probe.watch_url(&channel.channel_id)
    }

    /// Observe a channel once.
    ///
    /// Errors are returned, not swallowed; the caller decides how to degrade.
    pub async fn observe(&self, channel: &ChannelWatch) -> Result<Observation> {
        debug!(
            "Checking status for channel: {} ({})",
            channel.display_name, channel.channel_id
        );

        let status = tokio::time::timeout(self.timeout, self.probe.check(&channel.channel_id))
            .await
            .map_err(|_| {
                Error::observation(
                    &channel.channel_id,
                    ProbeError::Other(format!("timed out after {:?}", self.timeout)),
                )
            })?
            .map_err(|e| Error::observation(&channel.channel_id, e))?;

        Ok(status.into())
    }
}
