use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::types::announcement::Announcement;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
// the upstream sets no bound on read time, so we set one here
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("could not build http client")
}

pub fn feed_url(base: &Url, beta: bool) -> Result<Url> {
    let suffix = if beta { "-beta" } else { "" };
    base.join(&format!("cusf-notam-info{}/web.json", suffix))
        .context("could not build feed url")
}

/// One GET against the feed. Succeeds only on status 200 with a body that
/// decodes as an announcement.
pub async fn fetch(client: &Client, base: &Url, beta: bool) -> Result<Announcement> {
    let url = feed_url(base, beta)?;

    let resp = client.get(url)
        .send()
        .await
        .context("could not reach announcement feed")?;

    if resp.status() != StatusCode::OK {
        anyhow::bail!("announcement feed answered {}", resp.status());
    }

    resp.json().await.context("announcement feed body was not valid json")
}

/// Fetch the current announcement, absorbing every failure into the fixed
/// unknown record. Callers always get a usable announcement back.
pub async fn announcement(client: &Client, base: &Url, beta: bool) -> Announcement {
    match fetch(client, base, beta).await {
        Ok(announcement) => announcement,
        Err(e) => {
            warn!("using fallback announcement: {:#}", e);
            Announcement::unknown()
        }
    }
}
