use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use super::handlers::*;
use super::AppState;

pub fn create_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/crs", get(list_crs))
        .route("/api/reproject", get(reproject_point))
        .route("/api/survey", post(run_survey))
        .route("/api/upload", post(upload_csv))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(max_body_bytes))
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}
