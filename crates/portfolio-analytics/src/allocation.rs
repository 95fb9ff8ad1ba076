use analysis_core::{
    AccountSnapshot, AllocationEntry, AnalysisError, DiversificationMetrics, PortfolioSummary,
    Position,
};

/// Convert positions and account balances into allocation percentages and
/// diversification metrics.
///
/// An empty position list means the book is fully in cash: the percentage math
/// is skipped entirely, so a zero portfolio value is only rejected once there
/// are positions to allocate against.
pub fn allocation(
    positions: &[Position],
    account: &AccountSnapshot,
) -> Result<PortfolioSummary, AnalysisError> {
    if positions.is_empty() {
        return Ok(PortfolioSummary {
            portfolio_value: account.portfolio_value,
            cash: account.cash,
            equity: account.equity,
            allocations: Vec::new(),
            diversification: DiversificationMetrics {
                position_count: 0,
                top_holding: None,
                cash_percent: 100.0,
            },
        });
    }

    if account.portfolio_value == 0.0 {
        return Err(AnalysisError::InvalidState(
            "portfolio value is zero, cannot compute allocation percentages".to_string(),
        ));
    }

    let mut allocations: Vec<AllocationEntry> = positions
        .iter()
        .map(|p| AllocationEntry {
            symbol: p.symbol.clone(),
            market_value: p.market_value,
            percentage: p.market_value / account.portfolio_value * 100.0,
        })
        .collect();

    allocations.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top = allocations.first().unwrap();
    let diversification = DiversificationMetrics {
        position_count: positions.len(),
        top_holding: Some((top.symbol.clone(), top.percentage)),
        cash_percent: account.cash / account.portfolio_value * 100.0,
    };

    Ok(PortfolioSummary {
        portfolio_value: account.portfolio_value,
        cash: account.cash,
        equity: account.equity,
        allocations,
        diversification,
    })
}
