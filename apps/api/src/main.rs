mod config;
mod errors;
mod extraction;
mod resume;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::resume::ner::{EntityRecognizer, HeuristicRecognizer};
use crate::resume::parser::ResumeParser;
use crate::resume::skills::SkillsCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Load skills catalog
    let catalog = match &config.skills_catalog_path {
        Some(path) => Arc::new(
            SkillsCatalog::from_file(path)
                .with_context(|| format!("Failed to load skills catalog from {}", path.display()))?,
        ),
        None => SkillsCatalog::builtin(),
    };
    info!("Skills catalog loaded ({} entries)", catalog.len());

    // Initialize entity recognizer
    let recognizer: Option<Arc<dyn EntityRecognizer>> = if config.ner_enabled {
        info!("Name recognition enabled");
        Some(Arc::new(HeuristicRecognizer))
    } else {
        warn!("Name recognition disabled; extracted names will always be null");
        None
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser: ResumeParser::new(catalog, recognizer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
