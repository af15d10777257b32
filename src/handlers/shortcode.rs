use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::{Query, State};

use crate::client;
use crate::render;
use crate::types::config::Variant;

/// Long-form announcement text, pulled wherever the host substitutes the
/// launch-announcement shortcode.
pub async fn shortcode(
    State(state): State<Arc<crate::State>>,
    Query(params): Query<HashMap<String, String>>,
) -> String {
    state.requests_served.fetch_add(1, Ordering::SeqCst);

    match state.variant {
        Variant::Blocking => {
            let beta = super::beta_requested(&params);
            render::long_text(&state.client, &state.feed, beta).await
        }
        Variant::Deferred => client::placeholder_long(),
    }
}
