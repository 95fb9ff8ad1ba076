use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::AppState;

#[derive(Deserialize)]
pub struct DaysQuery {
    pub days: Option<u32>,
}

#[derive(Deserialize)]
pub struct CompareQuery {
    pub symbols: String,
    pub days: Option<u32>,
}

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analysis/:symbol", get(get_analysis))
        .route("/api/compare", get(get_comparison))
}

/// Simple market analysis for one symbol
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<DaysQuery>,
) -> String {
    state.orchestrator.simple_analysis(&symbol, query.days).await
}

/// Compare 2-5 symbols over a shared window
async fn get_comparison(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> String {
    state
        .orchestrator
        .compare_symbols(&query.symbols, query.days)
        .await
}
