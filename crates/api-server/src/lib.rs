use std::sync::Arc;

use alpaca_client::AlpacaClient;
use analysis_orchestrator::AnalysisOrchestrator;
use anyhow::Result;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod config;
mod market_routes;
mod portfolio_routes;

use config::ServerConfig;
use market_routes::market_routes;
use portfolio_routes::portfolio_routes;

/// One Alpaca client serves as both collaborators
pub type Orchestrator = AnalysisOrchestrator<Arc<AlpacaClient>, Arc<AlpacaClient>>;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

pub async fn run_server() -> Result<()> {
    let config = ServerConfig::from_env()?;

    let alpaca = Arc::new(AlpacaClient::from_env()?);
    tracing::info!(paper = alpaca.is_paper(), "connected to Alpaca");

    let state = AppState {
        orchestrator: Arc::new(AnalysisOrchestrator::new(alpaca.clone(), alpaca)),
    };

    let app = Router::new()
        .merge(market_routes())
        .merge(portfolio_routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("API server listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}
