//! Axum route handlers for model listing and ATS analysis.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::sections::AnalysisResult;
use crate::credentials::{resolve_api_key, API_KEY_FORM_FIELD};
use crate::errors::AppError;
use crate::llm_client::available_models;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Fields of the `/analyze` multipart form. Unknown fields are ignored.
#[derive(Debug, Default)]
struct AnalyzeForm {
    job_description: Option<String>,
    resume: Option<Bytes>,
    model_id: Option<String>,
    api_key: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /get-models
///
/// Lists generation-capable models for the caller's key, or the default pair
/// when no key is available.
pub async fn handle_get_models(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ModelsResponse>, AppError> {
    let key = resolve_api_key(&headers, None, state.config.gemini_api_key.as_deref());
    let models = available_models(state.gateway.as_ref(), key.as_ref()).await?;
    Ok(Json(ModelsResponse { models }))
}

/// POST /analyze
///
/// Builds the ATS prompt from the uploaded resume and job description and
/// returns the model's raw reply.
pub async fn handle_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut multipart = multipart
        .map_err(|e| AppError::MissingInput(format!("Invalid form data: {}", e.body_text())))?;
    let form = read_analyze_form(&mut multipart).await?;

    let key = resolve_api_key(
        &headers,
        form.api_key.as_deref(),
        state.config.gemini_api_key.as_deref(),
    )
    .ok_or(AppError::MissingCredential)?;

    let resume = form
        .resume
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::MissingInput("No resume file uploaded".to_string()))?;
    let resume_text = std::str::from_utf8(&resume)
        .map_err(|_| AppError::MissingInput("Resume file must be UTF-8 text".to_string()))?;

    let model_id = form
        .model_id
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.default_model.clone());
    let job_description = form.job_description.unwrap_or_default();

    let prompt = build_analysis_prompt(resume_text, &job_description);
    info!(
        model = %model_id,
        "Running ATS analysis (resume {} bytes, job description {} bytes)",
        resume_text.len(),
        job_description.len()
    );

    let result = AnalysisResult::new(state.gateway.generate(&key, &model_id, &prompt).await?);
    match result.sections() {
        Some(sections) => debug!(
            "Reply has {} bytes of analysis and {} bytes of LaTeX",
            sections.analysis.len(),
            sections.latex.len()
        ),
        None => warn!(model = %model_id, "Model reply is missing the analysis/LaTeX section markers"),
    }

    Ok(Json(result))
}

async fn read_analyze_form(multipart: &mut Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => form.job_description = Some(field.text().await.map_err(invalid_form)?),
            "resume" => form.resume = Some(field.bytes().await.map_err(invalid_form)?),
            "model_id" => form.model_id = Some(field.text().await.map_err(invalid_form)?),
            API_KEY_FORM_FIELD => form.api_key = Some(field.text().await.map_err(invalid_form)?),
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_form(e: MultipartError) -> AppError {
    AppError::MissingInput(format!("Invalid form data: {}", e.body_text()))
}
