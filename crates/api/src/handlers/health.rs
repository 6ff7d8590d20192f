use axum::http::header;
use axum::response::IntoResponse;
use tracing::debug;

pub async fn health_check() -> impl IntoResponse {
    debug!("Health check requested");
    ([(header::CONTENT_TYPE, "text/plain")], "200 OK")
}
