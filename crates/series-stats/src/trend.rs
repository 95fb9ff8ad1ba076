use analysis_core::{MarketCondition, Trend};

/// Short and long SMA windows used for trend classification
pub const SHORT_SMA_WINDOW: usize = 5;
pub const LONG_SMA_WINDOW: usize = 20;

/// Whole-window percent-change bands for the market-condition label
pub const OVERBOUGHT_PERCENT: f64 = 10.0;
pub const OVERSOLD_PERCENT: f64 = -10.0;

/// Classify a price series from its current price and moving averages.
///
/// A series shorter than the long SMA window is always Neutral, whatever the
/// SMA relation happens to be.
pub fn classify_trend(
    current: f64,
    sma5: Option<f64>,
    sma20: Option<f64>,
    series_len: usize,
) -> Trend {
    if series_len < LONG_SMA_WINDOW {
        return Trend::Neutral;
    }
    match (sma5, sma20) {
        (Some(sma5), Some(sma20)) if current > sma20 && sma5 > sma20 => Trend::Uptrend,
        (Some(sma5), Some(sma20)) if current < sma20 && sma5 < sma20 => Trend::Downtrend,
        _ => Trend::Neutral,
    }
}

/// Label the market condition from percent change over the whole window.
/// Both bands are exclusive: exactly +/-10% is still within normal range.
pub fn classify_condition(percent_change: f64) -> MarketCondition {
    if percent_change > OVERBOUGHT_PERCENT {
        MarketCondition::Overbought
    } else if percent_change < OVERSOLD_PERCENT {
        MarketCondition::Oversold
    } else {
        MarketCondition::Normal
    }
}
