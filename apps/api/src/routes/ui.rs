use anyhow::Context;
use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::state::AppState;

pub const INDEX_PAGE: &str = "index.html";

/// GET /
/// Serves the single-page UI from the templates directory.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.templates_dir.join(INDEX_PAGE);
    let page = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read UI page at {}", path.display()))?;
    Ok(Html(page))
}
