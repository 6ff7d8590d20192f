use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

/// Header carrying the platform invocation id.
pub const REQUEST_ID_HEADER: &str = "x-fc-request-id";

/// Invocation id of the current request, when the platform supplied one.
#[derive(Debug, Clone)]
pub struct RequestId(pub Arc<str>);

pub async fn track_request_id(mut request: Request, next: Next) -> Response {
    let Some(id) = extract_request_id(&request) else {
        return next.run(request).await;
    };

    request.extensions_mut().insert(RequestId(id.clone()));

    let span = info_span!("invoke", request_id = %id);
    async move {
        info!("FC Invoke Start RequestId: {}", id);
        let response = next.run(request).await;
        info!("FC Invoke End RequestId: {}", id);
        response
    }
    .instrument(span)
    .await
}

fn extract_request_id(request: &Request) -> Option<Arc<str>> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(Arc::from)
}
