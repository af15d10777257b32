use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::{Query, State};

use crate::fetch;
use crate::types::announcement::Announcement;

/// The same-origin feed endpoint the deferred-fetch pages request. Upstream
/// failures are absorbed here, so the answer is always 200 with a record;
/// a page that cannot reach *us* still falls back on its own.
pub async fn web_json(
    State(state): State<Arc<crate::State>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Announcement> {
    state.requests_served.fetch_add(1, Ordering::SeqCst);

    let beta = super::beta_requested(&params);
    Json(fetch::announcement(&state.client, &state.feed, beta).await)
}
