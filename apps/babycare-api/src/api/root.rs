use axum::{Router, routing::get};

/// Plain-text banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain"))
)]
pub async fn hello() -> &'static str {
    "Hello World!"
}

pub fn router() -> Router {
    Router::new().route("/", get(hello))
}
