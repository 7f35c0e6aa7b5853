use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Server-side credential used when a request carries none.
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub default_model: String,
    pub llm_timeout_secs: u64,
    /// Holds `index.html` and the `resume.cls` class staged into every compile job.
    pub templates_dir: PathBuf,
    pub tectonic_bin: PathBuf,
    pub compile_timeout_secs: u64,
    /// Wait between compiler exit and the PDF existence check.
    pub compile_settle_ms: u64,
    /// Parent for per-job scratch directories. `None` = system temp dir.
    pub scratch_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            default_model: optional_env("DEFAULT_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            templates_dir: optional_env("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("templates")),
            tectonic_bin: optional_env("TECTONIC_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("tectonic")),
            compile_timeout_secs: parse_env("COMPILE_TIMEOUT_SECS", 120)?,
            compile_settle_ms: parse_env("COMPILE_SETTLE_MS", 300)?,
            scratch_dir: optional_env("SCRATCH_DIR").map(PathBuf::from),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
        })
    }
}

/// Returns the variable's value, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_padded_number() {
        let port: u16 = parse_value("PORT", " 9090 ").unwrap();
        assert_eq!(port, 9090);
    }

    #[test]
    fn test_parse_value_error_names_the_variable() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_value_rejects_out_of_range_port() {
        assert!(parse_value::<u16>("PORT", "70000").is_err());
    }
}
