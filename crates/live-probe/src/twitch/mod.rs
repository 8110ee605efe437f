mod models;
mod probe;

pub use probe::{TwitchProbe, TwitchProbeConfig, normalize_login};
