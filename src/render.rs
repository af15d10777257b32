use reqwest::Client;
use url::Url;

use crate::fetch;

/// Emitted once into the page head by the host; styles the widget container.
pub const STYLESHEET: &str = "\
.launch {
  border: 5px solid orange;
  padding: 1em;
  font-weight: bold;
  width: 100%;
  font-size: 1.2em;
  text-align: center;
  background: #333;
}
";

/// Ambient host state made explicit: whether the page being rendered is the
/// home page, whether the beta feed was requested, and the opaque wrapper
/// fragments the host platform supplies around widget output.
#[derive(Debug, Clone, Default)]
pub struct WidgetContext {
    pub is_home: bool,
    pub beta: bool,
    pub before_widget: String,
    pub after_widget: String,
}

impl WidgetContext {
    pub fn home() -> Self {
        Self {
            is_home: true,
            ..Default::default()
        }
    }
}

/// Render the sidebar widget. Fetches during render and embeds the short
/// text; outside the home context the widget renders nothing at all.
pub async fn widget_html(client: &Client, feed: &Url, ctx: &WidgetContext) -> String {
    if !ctx.is_home {
        return String::new();
    }

    let announcement = fetch::announcement(client, feed, ctx.beta).await;

    format!(
        "{}<div class=\"launch\"><a href=\"launches\">{}</a></div>{}",
        ctx.before_widget, announcement.short, ctx.after_widget,
    )
}

/// The long-form text, substituted wherever the host expands the
/// launch-announcement shortcode. Not restricted to the home context.
pub async fn long_text(client: &Client, feed: &Url, beta: bool) -> String {
    fetch::announcement(client, feed, beta).await.long
}
