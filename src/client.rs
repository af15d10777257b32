//! The deferred-fetch rendering variant: the page is served with inert
//! placeholder spans, and one request after document load fills them in.
//! Server render never blocks on the feed here.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::render::WidgetContext;
use crate::types::announcement::Announcement;

// fixed marker classes; the hydration step finds its targets by these
pub const SHORT_CLASS: &str = "cusf-notam-info-short";
pub const LONG_CLASS: &str = "cusf-notam-info-long";

/// Same-origin endpoint the page requests after load.
pub const AJAX_PATH: &str = "/notam-ajax/web.json";

pub const FALLBACK_TEXT: &str = "Unknown";

/// Placeholder markup for the sidebar widget: same container and anchor as
/// the blocking variant, but with an empty short-marked span instead of text.
pub fn placeholder_widget(ctx: &WidgetContext) -> String {
    if !ctx.is_home {
        return String::new();
    }

    format!(
        "{}<div class=\"launch\"><a href=\"launches\"><span class=\"{}\"></span></a></div>{}",
        ctx.before_widget, SHORT_CLASS, ctx.after_widget,
    )
}

/// Placeholder substituted for the shortcode in this variant.
pub fn placeholder_long() -> String {
    format!("<span class=\"{}\"></span>", LONG_CLASS)
}

/// A rendered element as the hydration step sees it: a class list to match
/// against and a text content to assign.
#[derive(Debug, Clone)]
pub struct Element {
    classes: Vec<String>,
    text: String,
}

impl Element {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            text: String::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    fn has_markers(&self) -> bool {
        self.elements
            .iter()
            .any(|el| el.has_class(SHORT_CLASS) || el.has_class(LONG_CLASS))
    }
}

/// Fill the placeholder spans in, once, after the page is ready.
///
/// Pages without any marked element issue no request at all. Otherwise one
/// GET goes to the same-origin endpoint; when it settles, every marked
/// element first gets the fallback text, and only a 200 with a decodable
/// body overwrites that with the real announcement.
pub async fn hydrate(page: &mut Page, client: &Client, origin: &Url) {
    if !page.has_markers() {
        debug!("no announcement markers on page, skipping request");
        return;
    }

    let result = request(client, origin).await;

    for el in page.elements.iter_mut() {
        if el.has_class(SHORT_CLASS) || el.has_class(LONG_CLASS) {
            el.set_text(FALLBACK_TEXT);
        }
    }

    match result {
        Ok(data) => {
            for el in page.elements.iter_mut() {
                if el.has_class(SHORT_CLASS) {
                    el.set_text(data.short.clone());
                }
                if el.has_class(LONG_CLASS) {
                    el.set_text(data.long.clone());
                }
            }
        }
        Err(e) => debug!("announcement request failed: {:#}", e),
    }
}

async fn request(client: &Client, origin: &Url) -> Result<Announcement> {
    let url = origin.join(AJAX_PATH).context("could not build endpoint url")?;

    let resp = client.get(url)
        .send()
        .await
        .context("could not reach announcement endpoint")?;

    if resp.status() != StatusCode::OK {
        anyhow::bail!("announcement endpoint answered {}", resp.status());
    }

    resp.json().await.context("announcement body was not valid json")
}
