use super::compare::*;
use analysis_core::{AnalysisError, Bar, ComparisonRow};
use chrono::{Duration, Utc};
use std::collections::HashMap;

fn bars(closes: &[f64]) -> Vec<Bar> {
    let start = Utc::now() - Duration::days(closes.len() as i64);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp: start + Duration::days(i as i64),
            close,
            volume: 1_000_000,
        })
        .collect()
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parse_accepts_two_to_five() {
    assert_eq!(parse_symbol_list("AAPL,MSFT").unwrap(), symbols(&["AAPL", "MSFT"]));
    assert_eq!(
        parse_symbol_list(" A , B , C , D , E ").unwrap(),
        symbols(&["A", "B", "C", "D", "E"])
    );
}

#[test]
fn parse_rejects_one_symbol() {
    assert!(matches!(
        parse_symbol_list("AAPL"),
        Err(AnalysisError::InvalidInput(_))
    ));
}

#[test]
fn parse_rejects_six_symbols() {
    assert!(matches!(
        parse_symbol_list("A,B,C,D,E,F"),
        Err(AnalysisError::InvalidInput(_))
    ));
}

#[test]
fn parse_rejects_empty_entries() {
    assert!(matches!(
        parse_symbol_list("AAPL,,MSFT"),
        Err(AnalysisError::InvalidInput(_))
    ));
}

#[test]
fn ranks_best_and_worst() {
    let mut data = HashMap::new();
    data.insert("A".to_string(), bars(&[100.0, 105.0, 110.0]));
    data.insert("B".to_string(), bars(&[50.0, 49.0, 47.5]));

    let report = compare(30, &symbols(&["A", "B"]), &data);

    assert_eq!(report.rows.len(), 2);
    let (best_sym, best_pct) = report.best.unwrap();
    let (worst_sym, worst_pct) = report.worst.unwrap();
    assert_eq!(best_sym, "A");
    assert!((best_pct - 10.0).abs() < 1e-9);
    assert_eq!(worst_sym, "B");
    assert!((worst_pct + 5.0).abs() < 1e-9);
}

#[test]
fn missing_symbol_degrades_to_no_data_row() {
    let mut data = HashMap::new();
    data.insert("A".to_string(), bars(&[100.0, 110.0]));
    data.insert("B".to_string(), Vec::new());
    data.insert("C".to_string(), bars(&[200.0, 202.0]));

    let report = compare(30, &symbols(&["A", "B", "C"]), &data);

    assert!(matches!(&report.rows[1], ComparisonRow::NoData { symbol } if symbol == "B"));
    // Ranking only considers the two valid symbols
    assert_eq!(report.best.unwrap().0, "A");
    assert_eq!(report.worst.unwrap().0, "C");
}

#[test]
fn single_valid_symbol_omits_ranking() {
    let mut data = HashMap::new();
    data.insert("A".to_string(), bars(&[100.0, 110.0]));

    let report = compare(30, &symbols(&["A", "B"]), &data);

    assert!(report.best.is_none());
    assert!(report.worst.is_none());
}

#[test]
fn ties_preserve_requested_order() {
    let mut data = HashMap::new();
    data.insert("X".to_string(), bars(&[100.0, 110.0]));
    data.insert("Y".to_string(), bars(&[200.0, 220.0]));
    data.insert("Z".to_string(), bars(&[50.0, 40.0]));

    let report = compare(30, &symbols(&["X", "Y", "Z"]), &data);

    // X and Y both gained 10%; X was requested first so it stays first
    assert_eq!(report.best.unwrap().0, "X");
    assert_eq!(report.worst.unwrap().0, "Z");
}

#[test]
fn rows_keep_requested_order() {
    let mut data = HashMap::new();
    data.insert("A".to_string(), bars(&[10.0, 9.0]));
    data.insert("B".to_string(), bars(&[10.0, 11.0]));

    let report = compare(30, &symbols(&["A", "B"]), &data);

    assert_eq!(report.rows[0].symbol(), "A");
    assert_eq!(report.rows[1].symbol(), "B");
}

#[test]
fn average_volume_is_mean_of_bars() {
    let mut data = HashMap::new();
    let mut a = bars(&[10.0, 11.0, 12.0]);
    a[0].volume = 100;
    a[1].volume = 200;
    a[2].volume = 300;
    data.insert("A".to_string(), a);
    data.insert("B".to_string(), bars(&[10.0, 11.0]));

    let report = compare(30, &symbols(&["A", "B"]), &data);

    match &report.rows[0] {
        ComparisonRow::Data { avg_volume, .. } => assert!((avg_volume - 200.0).abs() < 1e-9),
        _ => panic!("expected data row for A"),
    }
}
