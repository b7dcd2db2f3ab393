mod capacity;
mod catalog;
mod distribution;
mod error;
mod handlers;
mod models;
mod sizing;
mod state;
mod synthesis;

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    routing::{get, post},
    Router,
};
use tera::Tera;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fabricsizer=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let switches = catalog::load_catalog(&config.catalog_path)
        .with_context(|| format!("failed to load switch catalog from {}", config.catalog_path))?;
    info!("loaded {} switch models", switches.len());

    let tera = Tera::new("templates/**/*.html").context("failed to parse templates")?;
    let state = Arc::new(AppState::new(tera, switches));

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/api/catalog", get(handlers::api_catalog))
        .route("/api/design", post(handlers::api_design))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
