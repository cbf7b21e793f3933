use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::eutils::EutilsClient;

pub mod handlers;
pub mod models;

pub fn create_router(eutils: Arc<EutilsClient>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search-papers", get(handlers::search_papers_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(eutils)
        .layer(cors)
}
