use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::compiler::CompileError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a JSON body with an `error` field.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No API key provided")]
    MissingCredential,

    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Compilation(String),

    #[error("Setup Error: {0}")]
    Setup(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Upstream(e.upstream_message())
    }
}

impl From<CompileError> for AppError {
    fn from(e: CompileError) -> Self {
        match e {
            CompileError::Diagnostics(text) => AppError::Compilation(text),
            CompileError::TimedOut(_) => AppError::Compilation(e.to_string()),
            CompileError::CompilerUnavailable { .. } | CompileError::MissingClassFile { .. } => {
                AppError::Setup(e.to_string())
            }
            CompileError::Staging(_) | CompileError::Process(_) | CompileError::Artifact(_) => {
                AppError::Internal(anyhow::Error::new(e))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingCredential | AppError::MissingInput(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::Upstream(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::Compilation(diagnostics) => {
                tracing::error!("PDF compilation failed: {diagnostics}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": diagnostics }))
            }
            AppError::Setup(details) => {
                tracing::error!("Setup error: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Setup Error", "details": details }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
