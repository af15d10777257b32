use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

pub use self::{
    heartbeat::*,
    shortcode::*,
    stylesheet::*,
    web_json::*,
    widget::*,
};

pub mod heartbeat;
pub mod shortcode;
pub mod stylesheet;
pub mod web_json;
pub mod widget;

pub fn router(state: Arc<crate::State>) -> Router {
    Router::new()
        .route("/notam-ajax/web.json", get(web_json))
        .route("/widget", get(widget))
        .route("/launch-announcement", get(shortcode))
        .route("/launch/launch.css", get(stylesheet))
        .route("/heartbeat", get(heartbeat))
        .with_state(state)
}

// the original selected the beta feed with a bare ?notam-info-beta query flag
pub(crate) fn beta_requested(params: &HashMap<String, String>) -> bool {
    params.contains_key("notam-info-beta")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::fetch;
    use crate::types::announcement::Announcement;
    use crate::types::config::Variant;

    fn test_state(feed: &str, variant: Variant) -> Arc<crate::State> {
        Arc::new(crate::State {
            client: fetch::http_client().unwrap(),
            feed: Url::parse(feed).unwrap(),
            variant,
            requests_served: AtomicU64::default(),
        })
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn web_json_serves_upstream_feed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/cusf-notam-info/web.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"short":"X","long":"Y"}"#)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Blocking);
        let (status, body) = get_body(router(state), "/notam-ajax/web.json").await;

        assert_eq!(status, StatusCode::OK);
        let announcement: Announcement = serde_json::from_slice(&body).unwrap();
        assert_eq!(announcement, Announcement::new("X", "Y"));
    }

    #[tokio::test]
    async fn web_json_absorbs_upstream_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/cusf-notam-info/web.json")
            .with_status(502)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Blocking);
        let (status, body) = get_body(router(state), "/notam-ajax/web.json").await;

        assert_eq!(status, StatusCode::OK);
        let announcement: Announcement = serde_json::from_slice(&body).unwrap();
        assert_eq!(announcement, Announcement::unknown());
    }

    #[tokio::test]
    async fn web_json_honours_beta_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/cusf-notam-info-beta/web.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"short":"beta","long":""}"#)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Blocking);
        let (status, body) = get_body(router(state), "/notam-ajax/web.json?notam-info-beta").await;

        assert_eq!(status, StatusCode::OK);
        let announcement: Announcement = serde_json::from_slice(&body).unwrap();
        assert_eq!(announcement.short, "beta");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn widget_serves_rendered_fragment() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/cusf-notam-info/web.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"short":"Live now!","long":""}"#)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Blocking);
        let (status, body) = get_body(router(state), "/widget").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "<div class=\"launch\"><a href=\"launches\">Live now!</a></div>",
        );
    }

    #[tokio::test]
    async fn deferred_widget_serves_placeholder_without_fetching() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/cusf-notam-info/web.json")
            .expect(0)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Deferred);
        let (status, body) = get_body(router(state), "/widget").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "<div class=\"launch\"><a href=\"launches\"><span class=\"cusf-notam-info-short\"></span></a></div>",
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn shortcode_serves_long_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/cusf-notam-info/web.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"short":"Live now!","long":"Launching this weekend."}"#)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Blocking);
        let (status, body) = get_body(router(state), "/launch-announcement").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), "Launching this weekend.");
    }

    #[tokio::test]
    async fn deferred_shortcode_serves_placeholder() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/cusf-notam-info/web.json")
            .expect(0)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Deferred);
        let (status, body) = get_body(router(state), "/launch-announcement").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "<span class=\"cusf-notam-info-long\"></span>",
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn stylesheet_is_css() {
        let state = test_state("http://127.0.0.1:9/", Variant::Blocking);
        let resp = router(state)
            .oneshot(Request::get("/launch/launch.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/css");
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(body.to_vec()).unwrap().contains(".launch"));
    }

    #[tokio::test]
    async fn heartbeat_answers() {
        let state = test_state("http://127.0.0.1:9/", Variant::Blocking);
        let (status, body) = get_body(router(state), "/heartbeat").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"alive");
    }

    #[tokio::test]
    async fn content_routes_count_requests() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/cusf-notam-info/web.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"short":"X","long":"Y"}"#)
            .expect_at_least(1)
            .create_async()
            .await;

        let state = test_state(&server.url(), Variant::Blocking);
        get_body(router(Arc::clone(&state)), "/notam-ajax/web.json").await;
        get_body(router(Arc::clone(&state)), "/widget").await;

        assert_eq!(state.requests_served.load(Ordering::SeqCst), 2);
    }
}
