use std::collections::HashMap;

use analysis_core::{
    AccountSnapshot, AnalysisError, Bar, ConcentrationRisk, Position, PositionRisk,
    ReturnVolatility, RiskFlag, RiskReport,
};
use series_stats::{daily_returns, population_volatility};

/// A position is high-risk when its return volatility and allocation both
/// cross these bands
pub const HIGH_RISK_VOLATILITY_PCT: f64 = 3.0;
pub const HIGH_RISK_ALLOCATION_PCT: f64 = 10.0;

/// Top-3 concentration above this is flagged High; exactly 50 is not
pub const CONCENTRATION_HIGH_PCT: f64 = 50.0;

/// Minimum series length for return volatility (5 return observations)
pub const MIN_BARS_FOR_RETURNS: usize = 6;

/// Per-position return volatility, high-risk flags and top-3 concentration.
///
/// `bars_by_symbol` covers a 30-day window from a single batched fetch. A
/// position whose series is too short gets the insufficient-data sentinel and
/// is skipped by the high-risk check without aborting the rest of the report.
pub fn analyze_risk(
    positions: &[Position],
    bars_by_symbol: &HashMap<String, Vec<Bar>>,
    account: &AccountSnapshot,
) -> Result<RiskReport, AnalysisError> {
    if account.portfolio_value == 0.0 {
        return Err(AnalysisError::InvalidState(
            "portfolio value is zero, cannot compute position weights".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(positions.len());
    let mut high_risk = Vec::new();

    for position in positions {
        let portfolio_percent = position.market_value / account.portfolio_value * 100.0;

        let volatility = match bars_by_symbol.get(&position.symbol) {
            Some(bars) if bars.len() >= MIN_BARS_FOR_RETURNS => {
                let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
                let returns = daily_returns(&closes);
                match population_volatility(&returns) {
                    Some(vol) => ReturnVolatility::Percent(vol * 100.0),
                    None => ReturnVolatility::InsufficientData,
                }
            }
            _ => ReturnVolatility::InsufficientData,
        };

        if let ReturnVolatility::Percent(vol) = volatility {
            if vol > HIGH_RISK_VOLATILITY_PCT && portfolio_percent > HIGH_RISK_ALLOCATION_PCT {
                high_risk.push(RiskFlag {
                    symbol: position.symbol.clone(),
                    volatility_percent: vol,
                    portfolio_percent,
                });
            }
        }

        rows.push(PositionRisk {
            symbol: position.symbol.clone(),
            volatility,
            market_value: position.market_value,
            portfolio_percent,
        });
    }

    let mut weights: Vec<f64> = rows.iter().map(|r| r.portfolio_percent).collect();
    weights.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let top3_percent: f64 = weights.iter().take(3).sum();

    let concentration = if top3_percent > CONCENTRATION_HIGH_PCT {
        ConcentrationRisk::High
    } else {
        ConcentrationRisk::ModerateLow
    };

    Ok(RiskReport {
        rows,
        high_risk,
        concentration,
        top3_percent,
    })
}
