use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::{Query, State};
use axum::response::Html;

use crate::client;
use crate::render::{self, WidgetContext};
use crate::types::config::Variant;

/// The sidebar widget as an includable fragment. Only the home page includes
/// this route, so it renders with the home context; the host's own wrapper
/// markup surrounds the include, not the fragment.
pub async fn widget(
    State(state): State<Arc<crate::State>>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    state.requests_served.fetch_add(1, Ordering::SeqCst);

    let ctx = WidgetContext {
        beta: super::beta_requested(&params),
        ..WidgetContext::home()
    };

    match state.variant {
        Variant::Blocking => Html(render::widget_html(&state.client, &state.feed, &ctx).await),
        Variant::Deferred => Html(client::placeholder_widget(&ctx)),
    }
}
