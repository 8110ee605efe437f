use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::error::ProbeError;
use crate::status::{LiveProbe, LiveStatus};
use crate::twitch::models::GqlResponse;

/// Twitch login names: 1 to 25 word characters.
static LOGIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,25}$").unwrap());

const LIVE_STATUS_QUERY: &str = "query ChannelLiveStatus($login: String!) { \
    user(login: $login) { login stream { type game { name } } broadcastSettings { title } } }";

/// Normalize a channel id into a Twitch login name.
///
/// Accepts bare logins as well as `twitch.tv/<login>` URLs, and lowercases
/// the result.
pub fn normalize_login(channel_id: &str) -> Result<String, ProbeError> {
    let trimmed = channel_id.trim().trim_end_matches('/');
    let login = trimmed
        .rsplit_once("twitch.tv/")
        .map(|(_, login)| login)
        .unwrap_or(trimmed);

    if LOGIN_REGEX.is_match(login) {
        Ok(login.to_ascii_lowercase())
    } else {
        Err(ProbeError::InvalidChannel(channel_id.to_string()))
    }
}

/// Settings for [`TwitchProbe`].
#[derive(Debug, Clone)]
pub struct TwitchProbeConfig {
    /// Value sent in the `Client-Id` header.
    pub client_id: String,
    /// GraphQL endpoint.
    pub gql_url: String,
    /// Optional user OAuth token.
    pub oauth_token: Option<String>,
}

impl TwitchProbeConfig {
    /// Client id used by the public Twitch web player.
    pub const WEB_CLIENT_ID: &'static str = "kimne78kx3ncx6brgo4mv6wki5h1ko";
    pub const GQL_URL: &'static str = "https://gql.twitch.tv/gql";
}

impl Default for TwitchProbeConfig {
    fn default() -> Self {
        Self {
            client_id: Self::WEB_CLIENT_ID.to_string(),
            gql_url: Self::GQL_URL.to_string(),
            oauth_token: None,
        }
    }
}

pub struct TwitchProbe {
    client: Client,
    config: TwitchProbeConfig,
}

impl TwitchProbe {
    const BASE_URL: &'static str = "https://twitch.tv";

    pub fn new(client: Client, config: TwitchProbeConfig) -> Self {
        Self { client, config }
    }

    fn build_query(login: &str) -> serde_json::Value {
        json!({
            "operationName": "ChannelLiveStatus",
            "query": LIVE_STATUS_QUERY,
            "variables": { "login": login },
        })
    }

    /// Turn a decoded GraphQL response into a status.
    pub(crate) fn interpret(response: GqlResponse) -> Result<LiveStatus, ProbeError> {
        if let Some(err) = response.errors.first() {
            return Err(ProbeError::ApiError(err.message.clone()));
        }

        let user = response
            .data
            .ok_or_else(|| ProbeError::ApiError("response carried no data".to_string()))?
            .user
            .ok_or(ProbeError::ChannelNotFound)?;

        let Some(stream) = user.stream else {
            return Ok(LiveStatus::Offline);
        };

        // Reruns and premieres report a non-"live" type.
        if stream.stream_type.as_deref().unwrap_or("live") != "live" {
            return Ok(LiveStatus::Offline);
        }

        let category = stream.game.map(|g| g.name).unwrap_or_default();
        let title = user
            .broadcast_settings
            .and_then(|b| b.title)
            .unwrap_or_default();

        Ok(LiveStatus::Online { category, title })
    }

    async fn post_gql(&self, body: serde_json::Value) -> Result<GqlResponse, ProbeError> {
        let mut request = self
            .client
            .post(&self.config.gql_url)
            .header("Client-Id", &self.config.client_id)
            .json(&body);

        if let Some(token) = &self.config.oauth_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("OAuth {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("gql response ({}): {}", status, body);

        if !status.is_success() {
            return Err(ProbeError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl LiveProbe for TwitchProbe {
    fn platform(&self) -> &'static str {
        "twitch"
    }

    fn watch_url(&self, channel_id: &str) -> String {
        let login = normalize_login(channel_id).unwrap_or_else(|_| channel_id.trim().to_string());
        format!("{}/{}", Self::BASE_URL, login)
    }

    async fn check(&self, channel_id: &str) -> Result<LiveStatus, ProbeError> {
        let login = normalize_login(channel_id)?;
        let response = self.post_gql(Self::build_query(&login)).await?;
        Self::interpret(response)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tracing::Level;

    use super::*;
    use crate::client::default_client;

    fn parse(body: &str) -> GqlResponse {
        serde_json::from_str(body).unwrap()
    }

    #[rstest]
    #[case("alicestream", "alicestream")]
    #[case("AliceStream", "alicestream")]
    #[case("https://www.twitch.tv/alice_99", "alice_99")]
    #[case("twitch.tv/alice/", "alice")]
    fn test_normalize_login(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_login(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("has space")]
    #[case("way_too_long_for_a_twitch_login")]
    fn test_normalize_login_invalid(#[case] input: &str) {
        assert!(matches!(
            normalize_login(input),
            Err(ProbeError::InvalidChannel(_))
        ));
    }

    #[test]
    fn test_watch_url() {
        let probe = TwitchProbe::new(default_client().unwrap(), TwitchProbeConfig::default());
        assert_eq!(probe.watch_url("AliceStream"), "https://twitch.tv/alicestream");
    }

    #[test]
    fn test_interpret_online() {
        let response = parse(
            r#"{"data":{"user":{"login":"alicestream",
                "stream":{"type":"live","game":{"name":"Counter-Strike: Global Offensive"}},
                "broadcastSettings":{"title":"ranked grinding"}}}}"#,
        );
        assert_eq!(
            TwitchProbe::interpret(response).unwrap(),
            LiveStatus::Online {
                category: "Counter-Strike: Global Offensive".to_string(),
                title: "ranked grinding".to_string(),
            }
        );
    }

    #[test]
    fn test_interpret_online_without_game() {
        let response = parse(
            r#"{"data":{"user":{"login":"a","stream":{"type":"live","game":null},
                "broadcastSettings":null}}}"#,
        );
        assert_eq!(
            TwitchProbe::interpret(response).unwrap(),
            LiveStatus::Online {
                category: String::new(),
                title: String::new(),
            }
        );
    }

    #[test]
    fn test_interpret_offline() {
        let response = parse(
            r#"{"data":{"user":{"login":"a","stream":null,
                "broadcastSettings":{"title":"last title"}}}}"#,
        );
        assert_eq!(TwitchProbe::interpret(response).unwrap(), LiveStatus::Offline);
    }

    #[test]
    fn test_interpret_rerun_is_offline() {
        let response = parse(
            r#"{"data":{"user":{"login":"a","stream":{"type":"rerun","game":null},
                "broadcastSettings":null}}}"#,
        );
        assert_eq!(TwitchProbe::interpret(response).unwrap(), LiveStatus::Offline);
    }

    #[test]
    fn test_interpret_unknown_user() {
        let response = parse(r#"{"data":{"user":null}}"#);
        assert!(matches!(
            TwitchProbe::interpret(response),
            Err(ProbeError::ChannelNotFound)
        ));
    }

    #[test]
    fn test_interpret_api_error() {
        let response = parse(r#"{"errors":[{"message":"service timeout"}]}"#);
        let err = TwitchProbe::interpret(response).unwrap_err();
        assert!(err.to_string().contains("service timeout"));
        assert!(!err.is_channel_error());
    }

    #[tokio::test]
    #[ignore]
    async fn test_check_live_channel() {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .init();
        let probe = TwitchProbe::new(default_client().unwrap(), TwitchProbeConfig::default());
        let status = probe.check("twitch").await.unwrap();
        println!("{status:?}");
    }
}
