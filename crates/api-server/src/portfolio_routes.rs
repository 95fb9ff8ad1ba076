use axum::{extract::State, routing::get, Router};

use crate::AppState;

pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/api/portfolio/summary", get(get_summary))
        .route("/api/portfolio/risk", get(get_risk))
}

/// Allocation breakdown and diversification metrics
async fn get_summary(State(state): State<AppState>) -> String {
    state.orchestrator.portfolio_summary().await
}

/// Per-position volatility, high-risk flags and concentration risk
async fn get_risk(State(state): State<AppState>) -> String {
    state.orchestrator.risk_analysis().await
}
