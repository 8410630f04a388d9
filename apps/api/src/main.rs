mod config;
mod errors;
mod generation;
mod i18n;
mod llm_client;
mod models;
mod presenter;
mod routes;
mod sessions;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::client::LlmCvGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sessions::{spawn_idle_sweeper, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Wizard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.generation_policy,
    )?;
    info!(
        "LLM client initialized (model: {}, attempts: {}, timeout: {:?})",
        llm.model(),
        llm.policy().max_attempts,
        llm.policy().timeout
    );

    // Sessions live in memory only
    let sessions = SessionStore::new();
    spawn_idle_sweeper(sessions.clone(), config.session_idle_ttl);
    info!("Session idle TTL: {:?}", config.session_idle_ttl);
    info!("Markup policy: {:?}", config.html_policy);

    let state = AppState {
        sessions,
        generator: Arc::new(LlmCvGenerator::new(llm)),
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
