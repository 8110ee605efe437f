//! Runtime configuration.
//!
//! Settings come from an optional TOML file; credentials come from the
//! environment (optionally seeded from `.env`). Command-line flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use live_probe::twitch::TwitchProbeConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compose::ComposerConfig;
use crate::monitor::StreamMonitorConfig;
use crate::notification::{TwitterConfig, WebhookConfig};
use crate::{Error, Result};

/// Environment variable names for credentials.
pub mod env {
    pub const TWITTER_CONSUMER_KEY: &str = "TWITKEY";
    pub const TWITTER_CONSUMER_SECRET: &str = "TWITSEC";
    pub const TWITTER_ACCESS_TOKEN: &str = "TOK";
    pub const TWITTER_ACCESS_TOKEN_SECRET: &str = "TOKSEC";
    pub const TWITCH_CLIENT_ID: &str = "TWITCHID";
    pub const TWITCH_OAUTH_TOKEN: &str = "TWITCH_OAUTH";
}

/// Twitch observer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitchSettings {
    /// `Client-Id` header. Defaults to the public web client id.
    pub client_id: Option<String>,
    pub gql_url: String,
    #[serde(skip)]
    pub oauth_token: Option<String>,
}

impl Default for TwitchSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            gql_url: TwitchProbeConfig::GQL_URL.to_string(),
            oauth_token: None,
        }
    }
}

impl TwitchSettings {
    pub fn probe_config(&self) -> TwitchProbeConfig {
        TwitchProbeConfig {
            client_id: self
                .client_id
                .clone()
                .unwrap_or_else(|| TwitchProbeConfig::WEB_CLIENT_ID.to_string()),
            gql_url: self.gql_url.clone(),
            oauth_token: self.oauth_token.clone(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    /// Roster file.
    pub roster_path: PathBuf,
    /// Maximum announcement length in characters.
    pub max_message_chars: usize,
    /// Live titles containing this text are never announced.
    pub test_marker: String,
    pub channel_pacing_secs: u64,
    pub cycle_interval_secs: u64,
    /// Per-request bound for status checks and publishing.
    pub request_timeout_secs: u64,
    /// Directory for rolling log files. Console only when unset.
    pub log_dir: Option<PathBuf>,
    pub twitch: TwitchSettings,
    pub twitter: TwitterConfig,
    pub webhook: Option<WebhookConfig>,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("streamers.txt"),
            max_message_chars: ComposerConfig::DEFAULT_MAX_CHARS,
            test_marker: ComposerConfig::DEFAULT_TEST_MARKER.to_string(),
            channel_pacing_secs: 1,
            cycle_interval_secs: 5 * 60,
            request_timeout_secs: 15,
            log_dir: None,
            twitch: TwitchSettings::default(),
            twitter: TwitterConfig::default(),
            webhook: None,
        }
    }
}

impl HeraldConfig {
    /// Load from a TOML file, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Fill credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Fill credentials from `lookup`. Empty values count as unset.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let creds = &mut self.twitter.credentials;
        if let Some(v) = get(env::TWITTER_CONSUMER_KEY) {
            creds.consumer_key = v;
        }
        if let Some(v) = get(env::TWITTER_CONSUMER_SECRET) {
            creds.consumer_secret = v;
        }
        if let Some(v) = get(env::TWITTER_ACCESS_TOKEN) {
            creds.access_token = v;
        }
        if let Some(v) = get(env::TWITTER_ACCESS_TOKEN_SECRET) {
            creds.access_token_secret = v;
        }

        if let Some(v) = get(env::TWITCH_CLIENT_ID) {
            self.twitch.client_id = Some(v);
        }
        if let Some(v) = get(env::TWITCH_OAUTH_TOKEN) {
            self.twitch.oauth_token = Some(v);
        }
    }

    /// Reject settings the monitor cannot run with.
    ///
    /// Outside dry-run mode at least one publisher must be usable.
    pub fn validate(&self, dry_run: bool) -> Result<()> {
        if self.max_message_chars == 0 {
            return Err(Error::config("max_message_chars must be greater than 0"));
        }
        if self.test_marker.is_empty() {
            return Err(Error::config("test_marker must not be empty"));
        }
        if self.cycle_interval_secs == 0 {
            return Err(Error::config("cycle_interval_secs must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        if dry_run {
            return Ok(());
        }

        let twitter_ready = self.twitter.enabled && self.twitter.credentials.is_complete();
        let webhook_ready = self
            .webhook
            .as_ref()
            .is_some_and(|w| w.enabled && !w.url.is_empty());

        if self.twitter.enabled && !self.twitter.credentials.is_complete() && !webhook_ready {
            return Err(Error::config(format!(
                "Twitter credentials missing: set {}, {}, {} and {}",
                env::TWITTER_CONSUMER_KEY,
                env::TWITTER_CONSUMER_SECRET,
                env::TWITTER_ACCESS_TOKEN,
                env::TWITTER_ACCESS_TOKEN_SECRET
            )));
        }
        if !twitter_ready && !webhook_ready {
            return Err(Error::config(
                "no notification channel enabled (use --dry-run to only log)",
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn composer_config(&self) -> ComposerConfig {
        ComposerConfig {
            max_chars: self.max_message_chars,
            test_marker: self.test_marker.clone(),
        }
    }

    pub fn monitor_config(&self) -> StreamMonitorConfig {
        StreamMonitorConfig {
            channel_pacing: Duration::from_secs(self.channel_pacing_secs),
            cycle_interval: Duration::from_secs(self.cycle_interval_secs),
        }
    }
}
