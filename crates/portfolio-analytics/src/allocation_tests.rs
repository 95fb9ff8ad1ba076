use super::allocation::*;
use analysis_core::{AccountSnapshot, AnalysisError, Position};

fn position(symbol: &str, market_value: f64) -> Position {
    Position {
        symbol: symbol.to_string(),
        market_value,
    }
}

fn account(cash: f64, equity: f64, portfolio_value: f64) -> AccountSnapshot {
    AccountSnapshot {
        cash,
        equity,
        portfolio_value,
    }
}

#[test]
fn percentages_sorted_descending() {
    let positions = vec![
        position("MID", 60.0),
        position("BIG", 100.0),
        position("SMALL", 40.0),
    ];
    let summary = allocation(&positions, &account(0.0, 200.0, 200.0)).unwrap();

    let pcts: Vec<f64> = summary.allocations.iter().map(|a| a.percentage).collect();
    assert_eq!(
        summary
            .allocations
            .iter()
            .map(|a| a.symbol.as_str())
            .collect::<Vec<_>>(),
        vec!["BIG", "MID", "SMALL"]
    );
    assert!((pcts[0] - 50.0).abs() < 1e-9);
    assert!((pcts[1] - 30.0).abs() < 1e-9);
    assert!((pcts[2] - 20.0).abs() < 1e-9);
}

#[test]
fn top_holding_is_largest_position() {
    let positions = vec![position("A", 100.0), position("B", 60.0), position("C", 40.0)];
    let summary = allocation(&positions, &account(0.0, 200.0, 200.0)).unwrap();

    let (symbol, pct) = summary.diversification.top_holding.unwrap();
    assert_eq!(symbol, "A");
    assert!((pct - 50.0).abs() < 1e-9);
    assert_eq!(summary.diversification.position_count, 3);
}

#[test]
fn cash_percent_against_portfolio_value() {
    let positions = vec![position("A", 150.0)];
    let summary = allocation(&positions, &account(50.0, 150.0, 200.0)).unwrap();
    assert!((summary.diversification.cash_percent - 25.0).abs() < 1e-9);
}

#[test]
fn empty_positions_is_fully_in_cash() {
    let summary = allocation(&[], &account(1000.0, 0.0, 1000.0)).unwrap();
    assert!(summary.allocations.is_empty());
    assert_eq!(summary.diversification.position_count, 0);
    assert!(summary.diversification.top_holding.is_none());
    assert!((summary.diversification.cash_percent - 100.0).abs() < 1e-9);
}

#[test]
fn empty_positions_skips_zero_value_check() {
    // No percentage math happens, so a zero portfolio value is fine here
    assert!(allocation(&[], &account(0.0, 0.0, 0.0)).is_ok());
}

#[test]
fn zero_portfolio_value_with_positions_is_invalid_state() {
    let positions = vec![position("A", 100.0)];
    assert!(matches!(
        allocation(&positions, &account(0.0, 0.0, 0.0)),
        Err(AnalysisError::InvalidState(_))
    ));
}
