//! Text rendering for the analysis operations. All formatting lives here, at
//! the outer edge of the pipeline; the computation crates only produce value
//! objects.

use std::fmt::Write;

use analysis_core::{
    ComparisonReport, ComparisonRow, PortfolioSummary, ReturnVolatility, RiskReport,
    SymbolAnalysis,
};

const DISCLAIMER: &str =
    "Note: This is a simplified analysis and should not be used as the sole basis for investment decisions.";

pub fn format_analysis(a: &SymbolAnalysis) -> String {
    let sma5 = a
        .sma5
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| "Insufficient data".to_string());
    let sma20 = a
        .sma20
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| "Insufficient data".to_string());

    format!(
        "\
Market Analysis for {symbol} (Past {days} Trading Days)
------------------------------------------------------
Current Price: ${current:.2}
Price Change: ${change:.2} ({percent:.2}%)
Volatility: ${volatility:.2}

Moving Averages:
- 5-Day SMA: {sma5}
- 20-Day SMA: {sma20}

Simple Trend Analysis: {trend}

Market Conditions: {condition}

{DISCLAIMER}
",
        symbol = a.symbol,
        days = a.days,
        current = a.current_price,
        change = a.price_change,
        percent = a.percent_change,
        volatility = a.volatility,
        trend = a.trend.to_label(),
        condition = a.condition.to_label(),
    )
}

pub fn format_comparison(c: &ComparisonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stock Comparison (Last {} Trading Days)", c.days);
    out.push_str("--------------------------------------\n");
    out.push_str("| Symbol | Start Price | Current Price | % Change | Volume (Avg) |\n");
    out.push_str("|--------|-------------|---------------|----------|-------------|\n");

    for row in &c.rows {
        match row {
            ComparisonRow::Data {
                symbol,
                start_price,
                end_price,
                percent_change,
                avg_volume,
            } => {
                let _ = writeln!(
                    out,
                    "| {symbol} | ${start_price:.2} | ${end_price:.2} | {percent_change:.2}% | {} |",
                    format_thousands(*avg_volume as u64)
                );
            }
            ComparisonRow::NoData { symbol } => {
                let _ = writeln!(out, "| {symbol} | No data available | - | - | - |");
            }
        }
    }

    if let (Some((best, best_pct)), Some((worst, worst_pct))) = (&c.best, &c.worst) {
        let _ = writeln!(out, "\nBest Performer: {best} ({best_pct:.2}%)");
        let _ = writeln!(out, "Worst Performer: {worst} ({worst_pct:.2}%)");
    }

    out
}

pub fn format_portfolio_summary(s: &PortfolioSummary) -> String {
    let mut out = String::new();
    out.push_str("Portfolio Summary\n");
    out.push_str("----------------\n");
    let _ = writeln!(out, "Total Portfolio Value: ${:.2}", s.portfolio_value);
    let _ = writeln!(
        out,
        "Cash: ${:.2} ({:.2}% of portfolio)",
        s.cash, s.diversification.cash_percent
    );
    let _ = writeln!(out, "Equity: ${:.2}", s.equity);

    out.push_str("\nPortfolio Allocation:\n");
    out.push_str("| Symbol | Value | % of Portfolio |\n");
    out.push_str("|--------|-------|----------------|\n");
    for entry in &s.allocations {
        let _ = writeln!(
            out,
            "| {} | ${:.2} | {:.2}% |",
            entry.symbol, entry.market_value, entry.percentage
        );
    }

    out.push_str("\nDiversification Metrics:\n");
    let _ = writeln!(
        out,
        "- Number of Positions: {}",
        s.diversification.position_count
    );
    match &s.diversification.top_holding {
        Some((symbol, pct)) => {
            let _ = writeln!(out, "- Top Holding: {symbol} ({pct:.2}%)");
        }
        None => out.push_str("- Top Holding: None\n"),
    }
    let _ = writeln!(out, "- Cash Position: {:.2}%", s.diversification.cash_percent);

    out
}

pub fn format_risk_report(r: &RiskReport) -> String {
    let mut out = String::new();
    out.push_str("Portfolio Risk Analysis\n");
    out.push_str("----------------------\n");
    out.push_str("| Symbol | Volatility (30-day) | Position Value | % of Portfolio |\n");
    out.push_str("|--------|---------------------|----------------|----------------|\n");

    for row in &r.rows {
        let volatility = match row.volatility {
            ReturnVolatility::Percent(v) => format!("{v:.2}%"),
            ReturnVolatility::InsufficientData => "Insufficient data".to_string(),
        };
        let _ = writeln!(
            out,
            "| {} | {volatility} | ${:.2} | {:.2}% |",
            row.symbol, row.market_value, row.portfolio_percent
        );
    }

    out.push_str("\nRisk Summary:\n");
    if r.high_risk.is_empty() {
        out.push_str("No high-risk positions identified based on volatility and allocation.\n");
    } else {
        out.push_str("High-Risk Positions (High volatility + Large allocation):\n");
        for flag in &r.high_risk {
            let _ = writeln!(
                out,
                "- {}: {:.2}% volatility, {:.2}% of portfolio",
                flag.symbol, flag.volatility_percent, flag.portfolio_percent
            );
        }
    }

    let _ = writeln!(
        out,
        "\nConcentration Risk: {} - Top 3 positions represent {:.2}% of portfolio",
        r.concentration.to_label(),
        r.top3_percent
    );

    out
}

/// Group an integer with thousands separators (1234567 -> "1,234,567")
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
