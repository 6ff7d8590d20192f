use crate::handlers;
use crate::middleware::track_request_id;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health_check).post(handlers::health_check))
        .route(
            "/dns-query",
            get(handlers::get_dns_query).post(handlers::post_dns_query),
        )
        .layer(middleware::from_fn(track_request_id))
        .with_state(state)
}
