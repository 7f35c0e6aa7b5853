// ATS analysis: prompt construction, the model call, and response sectioning.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod prompts;
pub mod sections;
