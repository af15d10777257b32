use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: Server,
    pub feed: Feed,
    #[serde(default)]
    pub influx: Option<Influx>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Server {
    pub address: String,
    #[serde(default)]
    pub variant: Variant,
}

/// Which rendering variant the widget routes serve: `blocking` fetches the
/// feed during render, `deferred` serves inert placeholders for the page to
/// fill in after load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Blocking,
    Deferred,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Feed {
    pub url: Url,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Influx {
    pub url: Url,
    pub org: String,
    pub bucket: String,
    pub token: String,
}
