//! Watched channel entity.

use super::state::{NotifyState, Observation, Transition, apply};

/// Handle values that mean "this channel has no social handle".
pub const NO_HANDLE_SENTINELS: &[&str] = &["none", "notwitter", "-"];

/// One roster entry plus its notification state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelWatch {
    pub display_name: String,
    pub channel_id: String,
    pub social_handle: Option<String>,
    notify_state: NotifyState,
}

impl ChannelWatch {
    /// Create an entry in the initial [`NotifyState::ArmedSuppressed`] state.
    pub fn new(
        display_name: impl Into<String>,
        channel_id: impl Into<String>,
        social_handle: Option<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            channel_id: channel_id.into(),
            social_handle: social_handle
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            notify_state: NotifyState::default(),
        }
    }

    pub fn notify_state(&self) -> NotifyState {
        self.notify_state
    }

    /// Feed one observation through the state machine.
    pub fn observe(&mut self, observation: &Observation) -> Transition {
        let from = self.notify_state;
        let (to, action) = apply(from, observation);
        self.notify_state = to;
        Transition { from, to, action }
    }

    /// The name to mention in announcements.
    ///
    /// Falls back to the display name when the handle is missing or one of
    /// the [`NO_HANDLE_SENTINELS`].
    pub fn resolved_handle(&self) -> &str {
        match self.social_handle.as_deref() {
            Some(handle) if !is_no_handle(handle) => handle,
            _ => &self.display_name,
        }
    }
}

fn is_no_handle(handle: &str) -> bool {
    let handle = handle.trim();
    handle.is_empty()
        || NO_HANDLE_SENTINELS
            .iter()
            .any(|s| handle.eq_ignore_ascii_case(s))
}
