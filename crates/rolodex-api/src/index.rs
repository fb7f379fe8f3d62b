//! `GET /`: a static page describing the API. No key required.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn handler() -> Html<&'static str> { Html(INDEX_HTML) }
