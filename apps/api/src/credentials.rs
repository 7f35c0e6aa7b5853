//! Credential resolution — finds the caller's Gemini API key.
//!
//! Precedence: `X-Gemini-Key` header, then the `api_key` form field, then the
//! server-side fallback from config. Blank values count as absent. The key is
//! never validated here; the upstream service is the only judge.

use std::fmt;

use axum::http::HeaderMap;

pub const API_KEY_HEADER: &str = "x-gemini-key";
pub const API_KEY_FORM_FIELD: &str = "api_key";

/// An opaque, caller-supplied API key. `Debug` is redacted so the value
/// cannot leak through tracing fields or error formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw value, returning `None` for blank input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolves the credential for one request.
pub fn resolve_api_key(
    headers: &HeaderMap,
    form_value: Option<&str>,
    server_fallback: Option<&str>,
) -> Option<ApiKey> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(ApiKey::new)
        .or_else(|| form_value.and_then(ApiKey::new))
        .or_else(|| server_fallback.and_then(ApiKey::new))
}
