//! Domain types: watched channels and their notification state machine.

pub mod channel;
pub mod state;

pub use channel::{ChannelWatch, NO_HANDLE_SENTINELS};
pub use state::{NotifyAction, NotifyState, Observation, Transition, apply};
