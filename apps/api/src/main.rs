mod config;
mod errors;
mod models;
mod provider;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::screening::vocabulary::SkillVocabulary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill vocabulary once; it is read-only for the process lifetime
    let vocabulary = match &config.skill_vocabulary_path {
        Some(path) => SkillVocabulary::from_file(path)?,
        None => SkillVocabulary::builtin()?,
    };
    if vocabulary.is_empty() {
        warn!("Skill vocabulary is empty; every local analysis will score 0");
    } else {
        info!("Skill vocabulary loaded ({} terms)", vocabulary.len());
    }

    let state = AppState::build(config.clone(), vocabulary)?;
    info!("Analysis backend: {}", state.analyzer.backend());
    if let Some(provider) = &state.provider {
        info!("Analysis provider: {}", provider.url());
    }

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
