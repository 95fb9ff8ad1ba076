use std::collections::HashMap;

use analysis_core::{
    AnalysisError, Bar, BrokerageSource, MarketDataSource, SymbolAnalysis,
};
use market_compare::{compare, parse_symbol_list};
use portfolio_analytics::{allocation, analyze_risk};
use series_stats::{
    classify_condition, classify_trend, population_volatility, price_change, sma,
    LONG_SMA_WINDOW, SHORT_SMA_WINDOW,
};

pub mod report;


/// Default lookback window for the symbol operations
pub const DEFAULT_ANALYSIS_DAYS: u32 = 30;

/// Minimum bars required before a single-symbol analysis is attempted
pub const MIN_ANALYSIS_BARS: usize = 10;

/// Fixed lookback for position return volatility
pub const RISK_WINDOW_DAYS: u32 = 30;

/// Composes the fetch→compute→format pipeline behind each caller-facing
/// operation. Holds only read-only collaborator handles; every call is a pure
/// function of its freshly fetched inputs, nothing is cached or persisted.
pub struct AnalysisOrchestrator<M, B> {
    market_data: M,
    brokerage: B,
}

impl<M: MarketDataSource, B: BrokerageSource> AnalysisOrchestrator<M, B> {
    pub fn new(market_data: M, brokerage: B) -> Self {
        Self {
            market_data,
            brokerage,
        }
    }

    /// Single-symbol analysis: price change, volatility, SMAs, trend and
    /// market-condition labels. Always returns text; errors are rendered,
    /// never raised.
    pub async fn simple_analysis(&self, symbol: &str, days: Option<u32>) -> String {
        let days = days.unwrap_or(DEFAULT_ANALYSIS_DAYS);
        match self.try_simple_analysis(symbol, days).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(symbol, %e, "simple analysis failed");
                format!("Error performing analysis for {symbol}: {e}")
            }
        }
    }

    async fn try_simple_analysis(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<String, AnalysisError> {
        let symbols = vec![symbol.to_string()];
        let mut all_bars = self.market_data.fetch_daily_bars(&symbols, days).await?;

        let mut bars = match all_bars.remove(symbol) {
            Some(bars) if !bars.is_empty() => bars,
            _ => {
                return Ok(format!(
                    "No historical data found for {symbol} in the last {days} days."
                ))
            }
        };
        analysis_core::sort_bars_ascending(&mut bars);

        if bars.len() < MIN_ANALYSIS_BARS {
            return Ok(format!(
                "Insufficient data for {symbol}. Need at least {MIN_ANALYSIS_BARS} days of data for analysis."
            ));
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let sma5 = sma(&closes, SHORT_SMA_WINDOW);
        let sma20 = sma(&closes, LONG_SMA_WINDOW);
        let pc = price_change(&closes)?;
        let volatility = population_volatility(&closes).unwrap_or(0.0);
        let current_price = *closes.last().unwrap();

        let analysis = SymbolAnalysis {
            symbol: symbol.to_string(),
            days,
            current_price,
            price_change: pc.change,
            percent_change: pc.percent,
            volatility,
            sma5,
            sma20,
            trend: classify_trend(current_price, sma5, sma20, closes.len()),
            condition: classify_condition(pc.percent),
        };

        Ok(report::format_analysis(&analysis))
    }

    /// Compare 2-5 symbols over a shared window. Per-symbol gaps degrade to
    /// placeholder rows; only malformed input or a collaborator failure
    /// produces an error message.
    pub async fn compare_symbols(&self, symbols: &str, days: Option<u32>) -> String {
        let days = days.unwrap_or(DEFAULT_ANALYSIS_DAYS);
        match self.try_compare(symbols, days).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(symbols, %e, "comparison failed");
                format!("Error comparing stocks: {e}")
            }
        }
    }

    async fn try_compare(&self, raw_symbols: &str, days: u32) -> Result<String, AnalysisError> {
        // Validation happens before the fetch so an oversized batch never
        // reaches the data source
        let symbols = parse_symbol_list(raw_symbols)?;

        let mut bars_by_symbol = self.market_data.fetch_daily_bars(&symbols, days).await?;
        for bars in bars_by_symbol.values_mut() {
            analysis_core::sort_bars_ascending(bars);
        }

        let comparison = compare(days, &symbols, &bars_by_symbol);
        Ok(report::format_comparison(&comparison))
    }

    /// Portfolio allocation breakdown with diversification metrics
    pub async fn portfolio_summary(&self) -> String {
        match self.try_portfolio_summary().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%e, "portfolio summary failed");
                format!("Error generating portfolio summary: {e}")
            }
        }
    }

    async fn try_portfolio_summary(&self) -> Result<String, AnalysisError> {
        let positions = self.brokerage.positions().await?;
        if positions.is_empty() {
            return Ok("No open positions found. Portfolio is entirely in cash.".to_string());
        }

        let account = self.brokerage.account().await?;
        let summary = allocation(&positions, &account)?;
        Ok(report::format_portfolio_summary(&summary))
    }

    /// Per-position return volatility, high-risk flags and concentration risk
    pub async fn risk_analysis(&self) -> String {
        match self.try_risk_analysis().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%e, "risk analysis failed");
                format!("Error performing risk analysis: {e}")
            }
        }
    }

    async fn try_risk_analysis(&self) -> Result<String, AnalysisError> {
        let positions = self.brokerage.positions().await?;
        if positions.is_empty() {
            return Ok("No open positions found. No risk analysis available.".to_string());
        }

        // One batched fetch for every held symbol
        let symbols: Vec<String> = positions.iter().map(|p| p.symbol.clone()).collect();
        let mut bars_by_symbol: HashMap<String, Vec<Bar>> = self
            .market_data
            .fetch_daily_bars(&symbols, RISK_WINDOW_DAYS)
            .await?;
        for bars in bars_by_symbol.values_mut() {
            analysis_core::sort_bars_ascending(bars);
        }

        let account = self.brokerage.account().await?;
        let risk = analyze_risk(&positions, &bars_by_symbol, &account)?;
        Ok(report::format_risk_report(&risk))
    }
}
