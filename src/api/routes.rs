use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use super::handlers::*;
use crate::config::ServerConfig;

pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/parse", get(parse_coordinate))
        .route("/api/format", get(format_coordinate))
        .route("/api/upload", post(upload_csv))
        .with_state(Arc::new(config.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.body_limit))
                .layer(CorsLayer::permissive()),
        )
}
