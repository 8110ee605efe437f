use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GqlResponse {
    pub data: Option<GqlData>,
    #[serde(default)]
    pub errors: Vec<GqlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GqlData {
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    #[allow(dead_code)]
    pub login: Option<String>,
    pub stream: Option<Stream>,
    pub broadcast_settings: Option<BroadcastSettings>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Stream {
    #[serde(rename = "type")]
    pub stream_type: Option<String>,
    pub game: Option<Game>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Game {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BroadcastSettings {
    pub title: Option<String>,
}
