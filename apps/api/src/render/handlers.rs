//! Axum route handler for PDF export.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadPdfRequest {
    pub latex: Option<String>,
}

/// POST /download-pdf
///
/// Compiles the posted LaTeX and returns the PDF as an attachment.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    payload: Result<Json<DownloadPdfRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload
        .map_err(|e| AppError::MissingInput(format!("Invalid request body: {}", e.body_text())))?;

    let latex = request
        .latex
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::MissingInput("No LaTeX content provided".to_string()))?;

    let pdf = state.compiler.compile(&latex).await?;
    info!(job_id = %pdf.job_id, "Sending resume.pdf ({} bytes)", pdf.bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=resume.pdf"),
        ],
        pdf.bytes,
    )
        .into_response())
}
