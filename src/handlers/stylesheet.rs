use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::render;

pub async fn stylesheet() -> Response {
    ([(header::CONTENT_TYPE, "text/css")], render::STYLESHEET).into_response()
}
