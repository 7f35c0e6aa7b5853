pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/get-models", get(analysis::handle_get_models))
        .route("/analyze", post(analysis::handle_analyze))
        .route("/download-pdf", post(render::handle_download_pdf))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
