pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::ingest::handlers::handle_upload;
use crate::pages;
use crate::search::handlers::handle_search;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::landing_page))
        .route("/form", get(pages::form_page))
        .route("/search", get(pages::search_page))
        // API
        .route("/api/upload", post(handle_upload))
        .route("/api/search", post(handle_search))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
