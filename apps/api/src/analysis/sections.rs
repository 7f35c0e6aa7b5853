//! Splits a raw analysis response into its Markdown and LaTeX halves.
//!
//! The model is asked (not forced) to follow the marker format, so a missing
//! marker is an expected outcome, not an error.

use serde::Serialize;

use crate::analysis::prompts::{ANALYSIS_MARKER, LATEX_MARKER};

/// The model's unstructured reply, passed through to the caller untouched.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "result")]
    pub raw_text: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Sections<'a> {
    pub analysis: &'a str,
    pub latex: &'a str,
}

impl AnalysisResult {
    pub fn new(raw_text: String) -> Self {
        Self { raw_text }
    }

    /// Returns both sections when the analysis marker precedes the LaTeX marker.
    pub fn sections(&self) -> Option<Sections<'_>> {
        let text = self.raw_text.as_str();
        let analysis_start = text.find(ANALYSIS_MARKER)? + ANALYSIS_MARKER.len();
        let latex_offset = text[analysis_start..].find(LATEX_MARKER)?;
        let latex_start = analysis_start + latex_offset + LATEX_MARKER.len();

        Some(Sections {
            analysis: text[analysis_start..analysis_start + latex_offset].trim(),
            latex: strip_code_fences(&text[latex_start..]),
        })
    }
}

/// Strips a ```latex / ```tex / ``` fence pair the model sometimes adds.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("latex")
        .or_else(|| rest.strip_prefix("tex"))
        .unwrap_or(rest);
    rest.trim_start()
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(rest.trim_start())
}
