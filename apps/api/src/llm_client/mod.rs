/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through the `ModelGateway` trait.
///
/// The client holds no credential. Every call carries the caller's key, so one
/// shared client serves all requests without per-request construction.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::credentials::ApiKey;

/// Returned by `available_models` when the caller has no credential.
pub const DEFAULT_MODELS: [&str; 2] = ["gemini-2.5-flash", "gemini-2.5-pro"];

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_CONTENT: &str = "generateContent";
const MODEL_PREFIX: &str = "models/";
const LIST_PAGE_SIZE: &str = "1000";
const MAX_LIST_PAGES: usize = 20;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked by the model: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// The message worth showing to a caller: the upstream text for API
    /// errors, the full description otherwise.
    pub fn upstream_message(&self) -> String {
        match self {
            LlmError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// The seam between handlers and the hosted model service.
///
/// Carried in `AppState` as `Arc<dyn ModelGateway>`.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Identifiers of every model that supports content generation.
    async fn list_models(&self, key: &ApiKey) -> Result<Vec<String>, LlmError>;

    /// Generates text for `prompt` with one synchronous, non-retried call.
    async fn generate(&self, key: &ApiKey, model_id: &str, prompt: &str)
        -> Result<String, LlmError>;
}

/// Lists models for `key`, or the static defaults when there is no key.
pub async fn available_models(
    gateway: &dyn ModelGateway,
    key: Option<&ApiKey>,
) -> Result<Vec<String>, LlmError> {
    match key {
        Some(key) => gateway.list_models(key).await,
        None => Ok(DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, LlmError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }
        match self.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(LlmError::Blocked(reason)),
            None => Err(LlmError::EmptyContent),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini REST client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini REST (v1beta) implementation of `ModelGateway`.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generate_url(&self, model_id: &str) -> String {
        let model = model_id.strip_prefix(MODEL_PREFIX).unwrap_or(model_id);
        format!("{}/models/{}:{}", self.base_url, model, GENERATE_CONTENT)
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn list_models(&self, key: &ApiKey) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_LIST_PAGES {
            let mut request = self
                .client
                .get(&url)
                .header(API_KEY_HEADER, key.expose())
                .query(&[("pageSize", LIST_PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListModelsResponse = check_status(request.send().await?).await?.json().await?;

            models.extend(
                page.models
                    .into_iter()
                    .filter(|m| {
                        m.supported_generation_methods
                            .iter()
                            .any(|method| method == GENERATE_CONTENT)
                    })
                    .map(|m| {
                        m.name
                            .strip_prefix(MODEL_PREFIX)
                            .map(str::to_string)
                            .unwrap_or(m.name)
                    }),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => {
                    debug!("Listed {} generation-capable models", models.len());
                    return Ok(models);
                }
            }
        }

        warn!("Model listing stopped after {MAX_LIST_PAGES} pages");
        Ok(models)
    }

    async fn generate(
        &self,
        key: &ApiKey,
        model_id: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url(model_id))
            .header(API_KEY_HEADER, key.expose())
            .json(&body)
            .send()
            .await?;

        let parsed: GenerateContentResponse = check_status(response).await?.json().await?;
        let text = parsed.into_text()?;

        debug!(model = model_id, chars = text.len(), "LLM call succeeded");
        Ok(text)
    }
}

/// Turns a non-2xx response into `LlmError::Api`, preferring the message
/// inside Gemini's `{"error": {...}}` envelope over the raw body.
async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Gemini API returned {}", status);
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}
