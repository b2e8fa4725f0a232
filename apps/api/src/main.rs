mod agent;
mod avatar;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod routes;
mod state;
mod stt;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::avatar::AvatarClient;
use crate::config::Config;
use crate::jobs::catalog::{load_catalog, seed_catalog};
use crate::jobs::matcher::JobMatcher;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::stt::SttClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Agent API v{}", env!("CARGO_PKG_VERSION"));

    // Job catalog: file override or the embedded seed
    let catalog = match &config.job_catalog_path {
        Some(path) => load_catalog(path).await?,
        None => seed_catalog()?,
    };
    let matcher = Arc::new(JobMatcher::new(catalog));
    info!("Job matcher initialized with {} postings", matcher.catalog().len());

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let stt = SttClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())?;

    let avatar = AvatarClient::new(config.heygen_api_key.clone(), config.heygen_base_url.clone())?;
    if !avatar.is_configured() {
        warn!("HEYGEN_API_KEY not set: avatar sessions disabled, avatar list uses fallback");
    }

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        matcher,
        stt,
        avatar,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin once it has a fixed deployment URL

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
