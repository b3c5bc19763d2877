mod config;
mod errors;
mod evaluation;
mod interview;
mod llm_client;
mod questions;
mod routes;
mod sessions;
mod speech;
mod state;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, SessionBackend};
use crate::llm_client::LlmClient;
use crate::questions::history::HistoryStore;
use crate::routes::build_router;
use crate::sessions::{
    FileSessionStore, MemorySessionStore, RedisSessionStore, SessionLocks, SessionStore,
};
use crate::speech::SpeechSynthesizer;
use crate::state::AppState;

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

    info!("Starting Interview Prep API v{}", env!("CARGO_PKG_VERSION"));

    for dir in [&config.question_cache_dir, &config.audio_dir] {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
        config.llm_max_attempts,
    )?
    .with_endpoint(config.anthropic_api_url.clone());
    info!(
        "LLM client initialized (model: {}, timeout: {}s, attempts: {})",
        llm_client::MODEL,
        config.llm_timeout_secs,
        config.llm_max_attempts
    );

    let sessions = build_session_store(&config).await?;
    info!("Session backend: {}", config.session_backend.as_str());

    let speech = SpeechSynthesizer::from_config(&config)?;

    // Build app state
    let state = AppState {
        generator: Arc::new(llm),
        sessions,
        locks: Arc::new(SessionLocks::new()),
        speech: Arc::new(speech),
        history: Arc::new(HistoryStore::new(&config.question_cache_dir)),
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

/// Picks the session backend named by `SESSION_BACKEND`.
async fn build_session_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.session_backend {
        SessionBackend::File => {
            tokio::fs::create_dir_all(&config.sessions_dir)
                .await
                .with_context(|| format!("creating {}", config.sessions_dir.display()))?;
            Arc::new(FileSessionStore::new(&config.sessions_dir))
        }
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        SessionBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("SESSION_BACKEND=redis requires REDIS_URL")?;
            Arc::new(RedisSessionStore::open(url)?)
        }
    };
    Ok(store)
}
