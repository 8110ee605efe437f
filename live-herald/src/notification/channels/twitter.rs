//! Twitter (X) notification channel.
//!
//! Posts through `POST /2/tweets` using OAuth 1.0a user-context signing.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::NotificationChannel;
use super::oauth::OAuth1Credentials;
use crate::notification::events::Announcement;
use crate::{Error, Result};

/// Twitter channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    /// Whether the channel is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Filled from the environment, never from the config file.
    #[serde(skip)]
    pub credentials: OAuth1Credentials,
}

fn default_enabled() -> bool {
    true
}

fn default_api_base() -> String {
    "https://api.twitter.com".to_string()
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_base: default_api_base(),
            credentials: OAuth1Credentials::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    data: UserData,
}

#[derive(Debug, Deserialize)]
struct UserData {
    username: String,
}

/// Twitter notification channel.
pub struct TwitterChannel {
    config: TwitterConfig,
    client: Client,
}

impl TwitterChannel {
    pub fn new(config: TwitterConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn error_from(response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = match status {
            StatusCode::TOO_MANY_REQUESTS => format!("rate limited: {body}"),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                format!("rejected credentials ({status}): {body}")
            }
            _ => format!("{status} - {body}"),
        };
        Error::publish("twitter", message)
    }
}

#[async_trait]
impl NotificationChannel for TwitterChannel {
    fn channel_type(&self) -> &'static str {
        "twitter"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.credentials.is_complete()
    }

    async fn send(&self, announcement: &Announcement) -> Result<()> {
        if !self.is_enabled() {
            return Err(Error::publish(
                "twitter",
                "channel is disabled or missing credentials",
            ));
        }

        let url = self.endpoint("/2/tweets");
        let auth = self
            .config
            .credentials
            .authorization_header("POST", &url, &[])?;

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&json!({ "text": announcement.text }))
            .send()
            .await
            .map_err(|e| Error::publish("twitter", format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let err = Self::error_from(response).await;
            warn!("{}", err);
            return Err(err);
        }

        match response.json::<TweetResponse>().await {
            Ok(tweet) => debug!(tweet_id = %tweet.data.id, "Tweet posted"),
            Err(e) => debug!("Tweet posted, response not decoded: {}", e),
        }
        Ok(())
    }

    async fn verify(&self) -> Result<()> {
        if !self.config.credentials.is_complete() {
            return Err(Error::config(
                "Twitter credentials missing (TWITKEY, TWITSEC, TOK, TOKSEC)",
            ));
        }

        let url = self.endpoint("/2/users/me");
        let auth = self
            .config
            .credentials
            .authorization_header("GET", &url, &[])?;

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let user: UserResponse = response.json().await?;
        debug!(username = %user.data.username, "Twitter credentials verified");
        Ok(())
    }
}
