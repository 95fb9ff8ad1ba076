use analysis_core::AnalysisError;

/// Price change over a series: absolute and percent relative to the first close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    pub change: f64,
    pub percent: f64,
}

/// Simple moving average over the last `window` values.
/// Returns None when the series is shorter than the window — the metric is
/// unavailable, not zero.
pub fn sma(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let sum: f64 = values[values.len() - window..].iter().sum();
    Some(sum / window as f64)
}

/// Last-minus-first change with percent relative to the first value
pub fn price_change(values: &[f64]) -> Result<PriceChange, AnalysisError> {
    let first = *values
        .first()
        .ok_or_else(|| AnalysisError::InsufficientData("empty price series".to_string()))?;
    let last = *values.last().unwrap();

    if first == 0.0 {
        return Err(AnalysisError::InvalidState(
            "cannot compute percent change from a zero base price".to_string(),
        ));
    }

    let change = last - first;
    Ok(PriceChange {
        change,
        percent: change / first * 100.0,
    })
}

/// Population standard deviation (n divisor, not n-1).
/// None only for an empty slice; a single value has volatility 0.
pub fn population_volatility(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

/// Daily returns: (p_i - p_{i-1}) / p_{i-1} for each consecutive pair.
/// A zero previous close would divide by zero; that pair is skipped.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter_map(|w| {
            if w[0] != 0.0 {
                Some((w[1] - w[0]) / w[0])
            } else {
                None
            }
        })
        .collect()
}
