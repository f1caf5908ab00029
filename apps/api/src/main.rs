mod analysis;
mod config;
mod errors;
mod github;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::resources::StaticResourceProvider;
use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::github::GitHubClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Waypoint API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = LlmClient::new(&config.llm)?;
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY not set: every analysis will use the deterministic fallback");
    }

    // Initialize GitHub metadata fetcher
    let github = GitHubClient::new(&config.github)?;
    info!(
        "GitHub client initialized (authenticated: {})",
        config.github.token.is_some()
    );

    let analysis = AnalysisService::new(
        Arc::new(llm),
        Arc::new(github),
        Arc::new(StaticResourceProvider),
        config.analysis_deadline,
        config.completion_max_attempts,
    );
    info!(
        "Analysis deadline {:?}, up to {} completion attempts",
        config.analysis_deadline, config.completion_max_attempts
    );

    // Build app state
    let state = AppState {
        analysis: Arc::new(analysis),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
