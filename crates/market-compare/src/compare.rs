use std::collections::HashMap;

use analysis_core::{AnalysisError, Bar, ComparisonReport, ComparisonRow};
use series_stats::price_change;

/// Allowed symbol-count range for a comparison batch
pub const MIN_COMPARE_SYMBOLS: usize = 2;
pub const MAX_COMPARE_SYMBOLS: usize = 5;

/// Parse and validate a comma-separated symbol list.
/// Runs before any fetch so an oversized batch never hits the data source.
pub fn parse_symbol_list(raw: &str) -> Result<Vec<String>, AnalysisError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();

    if symbols.iter().any(|s| s.is_empty()) {
        return Err(AnalysisError::InvalidInput(format!(
            "malformed symbol list: {raw:?}"
        )));
    }
    if symbols.len() < MIN_COMPARE_SYMBOLS || symbols.len() > MAX_COMPARE_SYMBOLS {
        return Err(AnalysisError::InvalidInput(format!(
            "please provide between {MIN_COMPARE_SYMBOLS} and {MAX_COMPARE_SYMBOLS} symbols to compare, got {}",
            symbols.len()
        )));
    }
    Ok(symbols)
}

/// Build per-symbol comparison rows and rank performers.
///
/// `bars_by_symbol` comes from a single batched fetch; a symbol that is absent
/// or mapped to an empty series degrades to a NoData row and stays out of the
/// ranking rather than aborting the batch. Bars must already be chronological.
pub fn compare(
    days: u32,
    symbols: &[String],
    bars_by_symbol: &HashMap<String, Vec<Bar>>,
) -> ComparisonReport {
    let mut rows = Vec::with_capacity(symbols.len());
    let mut performance: Vec<(String, f64)> = Vec::new();

    for symbol in symbols {
        let bars = match bars_by_symbol.get(symbol) {
            Some(bars) if !bars.is_empty() => bars,
            _ => {
                rows.push(ComparisonRow::NoData {
                    symbol: symbol.clone(),
                });
                continue;
            }
        };

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let pc = match price_change(&closes) {
            Ok(pc) => pc,
            Err(_) => {
                rows.push(ComparisonRow::NoData {
                    symbol: symbol.clone(),
                });
                continue;
            }
        };
        let avg_volume =
            bars.iter().map(|b| b.volume as f64).sum::<f64>() / bars.len() as f64;

        rows.push(ComparisonRow::Data {
            symbol: symbol.clone(),
            start_price: closes[0],
            end_price: *closes.last().unwrap(),
            percent_change: pc.percent,
            avg_volume,
        });
        performance.push((symbol.clone(), pc.percent));
    }

    // Stable sort keeps requested order among equal performers
    performance.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (best, worst) = if performance.len() >= 2 {
        (
            Some(performance.first().unwrap().clone()),
            Some(performance.last().unwrap().clone()),
        )
    } else {
        (None, None)
    };

    ComparisonReport {
        days,
        rows,
        best,
        worst,
    }
}
