use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily price bar for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub volume: u64,
}

/// Sort bars chronologically ascending. Upstream providers promise this
/// ordering but a misordered series silently corrupts moving averages and
/// return calculations, so we never trust it.
pub fn sort_bars_ascending(bars: &mut [Bar]) {
    bars.sort_by_key(|b| b.timestamp);
}

/// Open position as reported by the brokerage at call time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub market_value: f64,
}

/// Account-level balances as of call time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub cash: f64,
    pub equity: f64,
    pub portfolio_value: f64,
}

/// Trend label for a single price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Neutral,
}

impl Trend {
    pub fn to_label(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Uptrend",
            Trend::Downtrend => "Downtrend",
            Trend::Neutral => "Neutral/Consolidating",
        }
    }
}

/// Market-condition label derived from whole-window percent change.
/// Orthogonal to [`Trend`]; both are reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCondition {
    Overbought,
    Oversold,
    Normal,
}

impl MarketCondition {
    pub fn to_label(&self) -> &'static str {
        match self {
            MarketCondition::Overbought => "Potentially Overbought",
            MarketCondition::Oversold => "Potentially Oversold",
            MarketCondition::Normal => "Within normal range",
        }
    }
}

/// Single-symbol analysis output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub days: u32,
    pub current_price: f64,
    pub price_change: f64,
    pub percent_change: f64,
    pub volatility: f64,
    pub sma5: Option<f64>,
    pub sma20: Option<f64>,
    pub trend: Trend,
    pub condition: MarketCondition,
}

/// One row of a multi-symbol comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ComparisonRow {
    Data {
        symbol: String,
        start_price: f64,
        end_price: f64,
        percent_change: f64,
        avg_volume: f64,
    },
    NoData {
        symbol: String,
    },
}

impl ComparisonRow {
    pub fn symbol(&self) -> &str {
        match self {
            ComparisonRow::Data { symbol, .. } => symbol,
            ComparisonRow::NoData { symbol } => symbol,
        }
    }
}

/// Multi-symbol comparison output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub days: u32,
    /// Rows in requested symbol order
    pub rows: Vec<ComparisonRow>,
    /// (symbol, percent change); None with fewer than 2 valid rows
    pub best: Option<(String, f64)>,
    pub worst: Option<(String, f64)>,
}

/// One position's share of the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub symbol: String,
    pub market_value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiversificationMetrics {
    pub position_count: usize,
    /// Largest holding after the descending sort; None for an all-cash book
    pub top_holding: Option<(String, f64)>,
    pub cash_percent: f64,
}

/// Portfolio allocation output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub portfolio_value: f64,
    pub cash: f64,
    pub equity: f64,
    /// Sorted descending by percentage; empty for an all-cash book
    pub allocations: Vec<AllocationEntry>,
    pub diversification: DiversificationMetrics,
}

/// 30-day return volatility for one position, or the insufficient-data
/// sentinel when the series has too few bars to compute returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReturnVolatility {
    Percent(f64),
    InsufficientData,
}

/// Per-position row of the risk report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRisk {
    pub symbol: String,
    pub volatility: ReturnVolatility,
    pub market_value: f64,
    pub portfolio_percent: f64,
}

/// Position flagged as high volatility + large allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlag {
    pub symbol: String,
    pub volatility_percent: f64,
    pub portfolio_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationRisk {
    High,
    ModerateLow,
}

impl ConcentrationRisk {
    pub fn to_label(&self) -> &'static str {
        match self {
            ConcentrationRisk::High => "High",
            ConcentrationRisk::ModerateLow => "Moderate/Low",
        }
    }
}

/// Portfolio risk output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Rows in brokerage position order
    pub rows: Vec<PositionRisk>,
    /// High-risk positions in encounter order; possibly empty
    pub high_risk: Vec<RiskFlag>,
    pub concentration: ConcentrationRisk,
    /// Sum of the top-3 allocation percentages
    pub top3_percent: f64,
}
