use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{healthz, hello, ingest_ping, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/v1/gps", post(ingest_ping))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
