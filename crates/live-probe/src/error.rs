use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid channel: {0}")]
    InvalidChannel(String),
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("api error: {0}")]
    ApiError(String),
    #[error("channel not found")]
    ChannelNotFound,
    #[error("other: {0}")]
    Other(String),
}

impl ProbeError {
    /// Whether the error says something about the channel rather than the network.
    pub fn is_channel_error(&self) -> bool {
        matches!(self, Self::InvalidChannel(_) | Self::ChannelNotFound)
    }
}
