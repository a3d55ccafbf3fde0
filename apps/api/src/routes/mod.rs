pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimizer::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route(
            "/api/v1/documents/segment",
            post(handlers::handle_segment),
        )
        .route("/api/v1/recommendations", post(handlers::handle_recommend))
        .route("/api/v1/optimize", post(handlers::handle_optimize))
        .with_state(state)
}
