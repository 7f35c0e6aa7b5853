use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelGateway;
use crate::render::LatexCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutable; requests never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless model gateway. Credentials travel with each call, not with the client.
    pub gateway: Arc<dyn ModelGateway>,
    pub compiler: LatexCompiler,
}
