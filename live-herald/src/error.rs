//! Application-wide error types.

use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Roster error at {path}:{line}: {message}")]
    Roster {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Observation failed for {channel_id}: {source}")]
    Observation {
        channel_id: String,
        #[source]
        source: live_probe::ProbeError,
    },

    #[error("Publish via {channel} failed: {message}")]
    Publish { channel: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn roster(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Roster {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn publish(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Publish {
            channel: channel.into(),
            message: message.into(),
        }
    }

    pub fn observation(channel_id: impl Into<String>, source: live_probe::ProbeError) -> Self {
        Self::Observation {
            channel_id: channel_id.into(),
            source,
        }
    }
}
