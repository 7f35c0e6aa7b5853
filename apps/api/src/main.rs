mod analysis;
mod config;
mod credentials;
mod errors;
mod llm_client;
mod render;
mod routes;
mod state;
#[cfg(all(test, unix))]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::render::{compiler::CLASS_FILE, LatexCompiler};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    let gateway = GeminiClient::new(
        &config.gemini_api_base,
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM gateway initialized ({})", config.gemini_api_base);
    if config.gemini_api_key.is_some() {
        info!("Server-side Gemini key configured as fallback credential");
    }

    let class_file = config.templates_dir.join(CLASS_FILE);
    if !class_file.is_file() {
        warn!(
            "LaTeX class file missing at {}; PDF export will fail until it exists",
            class_file.display()
        );
    }
    let compiler = LatexCompiler::from_config(&config);
    info!(
        "PDF compiler: {} (timeout {}s)",
        config.tectonic_bin.display(),
        config.compile_timeout_secs
    );

    let state = AppState {
        config: config.clone(),
        gateway: Arc::new(gateway),
        compiler,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI is served from a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
