//! Webhook notification channel.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::NotificationChannel;
use crate::notification::events::Announcement;
use crate::{Error, Result};

/// Webhook channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub enabled: bool,
    /// Endpoint receiving the JSON POST.
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub bearer_token: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: String::new(),
            bearer_token: None,
        }
    }
}

/// Posts each announcement as JSON to a fixed URL.
pub struct WebhookChannel {
    config: WebhookConfig,
    client: Client,
}

impl WebhookChannel {
    pub fn new(config: WebhookConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let request = self.client.request(method, &self.config.url);
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn payload(announcement: &Announcement) -> serde_json::Value {
        json!({
            "text": announcement.text,
            "channel_id": announcement.channel_id,
            "display_name": announcement.display_name,
            "url": announcement.watch_url,
            "timestamp": announcement.created_at.to_rfc3339(),
        })
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn channel_type(&self) -> &'static str {
        "webhook"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.url.is_empty()
    }

    async fn send(&self, announcement: &Announcement) -> Result<()> {
        if !self.is_enabled() {
            return Err(Error::publish("webhook", "channel is disabled"));
        }

        let response = self
            .request(Method::POST)
            .json(&Self::payload(announcement))
            .send()
            .await
            .map_err(|e| Error::publish("webhook", format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Webhook failed: {} - {}", status, body);
            return Err(Error::publish("webhook", format!("{status} - {body}")));
        }

        debug!(channel_id = %announcement.channel_id, "Webhook notification sent");
        Ok(())
    }

    /// Sends a `HEAD` request. Any answer other than 401/403 counts as
    /// reachable.
    async fn verify(&self) -> Result<()> {
        if self.config.url.is_empty() {
            return Err(Error::config("webhook url is empty"));
        }

        let response = self
            .request(Method::HEAD)
            .send()
            .await
            .map_err(|e| Error::publish("webhook", format!("request failed: {e}")))?;

        match response.status() {
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => Err(Error::publish(
                "webhook",
                format!("rejected credentials ({status})"),
            )),
            status => {
                debug!(%status, "Webhook endpoint reachable");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelWatch;

    fn client() -> Client {
        live_probe::default_client().unwrap()
    }

    fn announcement() -> Announcement {
        let entry = ChannelWatch::new("Alice", "alicestream", None);
        Announcement::new(&entry, "https://twitch.tv/alicestream", "Alice is live", false)
    }

    #[test]
    fn test_config_from_toml_section() {
        let config: WebhookConfig =
            toml::from_str("url = \"https://example.com/hook\"\nbearer_token = \"t\"").unwrap();
        assert!(config.enabled);
        assert_eq!(config.bearer_token.as_deref(), Some("t"));
    }

    #[test]
    fn test_enabled_requires_url() {
        let channel = WebhookChannel::new(WebhookConfig::default(), client());
        assert!(!channel.is_enabled());

        let config = WebhookConfig {
            url: "https://example.com/hook".to_string(),
            ..Default::default()
        };
        assert!(WebhookChannel::new(config, client()).is_enabled());
    }

    #[test]
    fn test_payload() {
        let payload = WebhookChannel::payload(&announcement());
        assert_eq!(payload["channel_id"], "alicestream");
        assert_eq!(payload["display_name"], "Alice");
        assert_eq!(payload["text"], "Alice is live");
        assert_eq!(payload["url"], "https://twitch.tv/alicestream");
        assert!(payload["timestamp"].is_string());
    }

    #[test]
    fn test_bearer_header() {
        let config = WebhookConfig {
            url: "https://example.com/hook".to_string(),
            bearer_token: Some("test-token".to_string()),
            ..Default::default()
        };
        let channel = WebhookChannel::new(config, client());
        let request = channel.request(Method::POST).build().unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer test-token"
        );
    }

    #[test]
    fn test_no_bearer_header() {
        let config = WebhookConfig {
            url: "https://example.com/hook".to_string(),
            ..Default::default()
        };
        let channel = WebhookChannel::new(config, client());
        let request = channel.request(Method::HEAD).build().unwrap();
        assert!(!request.headers().contains_key(reqwest::header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_send_when_disabled_is_error() {
        let config = WebhookConfig {
            enabled: false,
            url: "https://example.com/hook".to_string(),
            ..Default::default()
        };
        let channel = WebhookChannel::new(config, client());

        let err = channel.send(&announcement()).await.unwrap_err();
        assert!(matches!(err, Error::Publish { .. }), "{err}");
    }

    #[tokio::test]
    async fn test_verify_without_url() {
        let channel = WebhookChannel::new(WebhookConfig::default(), client());
        let err = channel.verify().await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
