//! Per-channel notification state machine.

use live_probe::LiveStatus;

/// Notification eligibility of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotifyState {
    /// A notification already fired for the current live session, or the
    /// channel has not been seen offline since startup.
    #[default]
    ArmedSuppressed,
    /// The next online observation fires a notification.
    ArmedReady,
}

impl NotifyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArmedSuppressed => "ARMED_SUPPRESSED",
            Self::ArmedReady => "ARMED_READY",
        }
    }
}

impl std::fmt::Display for NotifyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One poll result for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Online { category: String, title: String },
    Offline,
}

impl Observation {
    pub fn online(category: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Online {
            category: category.into(),
            title: title.into(),
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online { .. } => "online",
            Self::Offline => "offline",
        }
    }
}

impl From<LiveStatus> for Observation {
    fn from(status: LiveStatus) -> Self {
        match status {
            LiveStatus::Online { category, title } => Self::Online { category, title },
            LiveStatus::Offline => Self::Offline,
        }
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAction {
    None,
    Notify,
}

/// Outcome of feeding one observation to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: NotifyState,
    pub to: NotifyState,
    pub action: NotifyAction,
}

impl Transition {
    pub fn should_notify(&self) -> bool {
        self.action == NotifyAction::Notify
    }

    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Edge-triggered transition function.
///
/// Fires exactly once per offline-to-online edge. A channel that is live when
/// the process starts is never announced, because every channel starts in
/// [`NotifyState::ArmedSuppressed`] and needs an offline observation to arm.
pub fn apply(state: NotifyState, observation: &Observation) -> (NotifyState, NotifyAction) {
    use NotifyState::*;

    match (state, observation.is_online()) {
        (ArmedReady, true) => (ArmedSuppressed, NotifyAction::Notify),
        (ArmedSuppressed, false) => (ArmedReady, NotifyAction::None),
        (state, _) => (state, NotifyAction::None),
    }
}
