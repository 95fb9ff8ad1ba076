use super::stats::*;
use super::trend::*;
use analysis_core::{AnalysisError, MarketCondition, Trend};

#[test]
fn sma_exact_window() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let result = sma(&data, 5).unwrap();
    assert!((result - 3.0).abs() < 1e-9);
}

#[test]
fn sma_uses_most_recent_values() {
    let data = vec![10.0, 1.0, 2.0, 3.0];
    let result = sma(&data, 3).unwrap();
    assert!((result - 2.0).abs() < 1e-9); // (1+2+3)/3
}

#[test]
fn sma_unavailable_when_series_too_short() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert!(sma(&data, 6).is_none());
    assert!(sma(&[], 1).is_none());
}

#[test]
fn price_change_basic() {
    let data = vec![100.0, 105.0, 110.0];
    let pc = price_change(&data).unwrap();
    assert!((pc.change - 10.0).abs() < 1e-9);
    assert!((pc.percent - 10.0).abs() < 1e-9);
}

#[test]
fn price_change_zero_base_is_invalid_state() {
    let data = vec![0.0, 5.0];
    assert!(matches!(
        price_change(&data),
        Err(AnalysisError::InvalidState(_))
    ));
}

#[test]
fn price_change_empty_is_insufficient() {
    assert!(matches!(
        price_change(&[]),
        Err(AnalysisError::InsufficientData(_))
    ));
}

#[test]
fn population_volatility_known_value() {
    // mean 3, variance (4+1+0+1+4)/5 = 2
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let vol = population_volatility(&data).unwrap();
    assert!((vol - 2.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn population_volatility_single_value_is_zero() {
    assert_eq!(population_volatility(&[42.0]), Some(0.0));
}

#[test]
fn population_volatility_empty_is_none() {
    assert!(population_volatility(&[]).is_none());
}

#[test]
fn daily_returns_basic() {
    let closes = vec![100.0, 110.0, 99.0];
    let returns = daily_returns(&closes);
    assert_eq!(returns.len(), 2);
    assert!((returns[0] - 0.10).abs() < 1e-9);
    assert!((returns[1] + 0.10).abs() < 1e-9);
}

#[test]
fn daily_returns_skips_zero_base() {
    let closes = vec![100.0, 0.0, 50.0];
    let returns = daily_returns(&closes);
    assert_eq!(returns.len(), 1);
    assert!((returns[0] + 1.0).abs() < 1e-9);
}

#[test]
fn trend_uptrend() {
    let trend = classify_trend(110.0, Some(108.0), Some(100.0), 25);
    assert_eq!(trend, Trend::Uptrend);
}

#[test]
fn trend_downtrend() {
    let trend = classify_trend(90.0, Some(92.0), Some(100.0), 25);
    assert_eq!(trend, Trend::Downtrend);
}

#[test]
fn trend_neutral_when_mixed() {
    // current above the long SMA but short SMA below it
    let trend = classify_trend(101.0, Some(98.0), Some(100.0), 25);
    assert_eq!(trend, Trend::Neutral);
}

#[test]
fn trend_short_series_is_always_neutral() {
    // same prices as the uptrend case, but only 15 bars
    let trend = classify_trend(110.0, Some(108.0), Some(100.0), 15);
    assert_eq!(trend, Trend::Neutral);
}

#[test]
fn condition_bands_are_exclusive() {
    assert_eq!(classify_condition(10.0), MarketCondition::Normal);
    assert_eq!(classify_condition(10.01), MarketCondition::Overbought);
    assert_eq!(classify_condition(-10.0), MarketCondition::Normal);
    assert_eq!(classify_condition(-10.01), MarketCondition::Oversold);
    assert_eq!(classify_condition(0.0), MarketCondition::Normal);
}
