use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

use analysis_core::{AccountSnapshot, Bar, Position};

/// One bar from the Alpaca Market Data API (short wire field names)
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: u64,
}

impl AlpacaBar {
    pub fn to_bar(&self) -> Bar {
        Bar {
            timestamp: self.timestamp,
            close: self.close,
            volume: self.volume,
        }
    }
}

/// Multi-symbol bars response. A symbol with no bars in range is simply
/// absent from the map.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiBarsResponse {
    #[serde(default)]
    pub bars: HashMap<String, Vec<AlpacaBar>>,
    pub next_page_token: Option<String>,
}

/// Trading API account payload. Alpaca sends money fields as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaAccount {
    pub id: String,
    pub status: String,
    pub currency: String,
    pub cash: String,
    pub equity: String,
    pub portfolio_value: String,
}

impl AlpacaAccount {
    pub fn to_snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            cash: parse_money(&self.cash),
            equity: parse_money(&self.equity),
            portfolio_value: parse_money(&self.portfolio_value),
        }
    }
}

/// Trading API position payload
#[derive(Debug, Clone, Deserialize)]
pub struct AlpacaPosition {
    pub symbol: String,
    pub qty: String,
    pub side: String,
    pub market_value: String,
    pub avg_entry_price: String,
    pub current_price: String,
}

impl AlpacaPosition {
    pub fn to_position(&self) -> Position {
        Position {
            symbol: self.symbol.clone(),
            market_value: parse_money(&self.market_value),
        }
    }
}

fn parse_money(raw: &str) -> f64 {
    Decimal::from_str(raw)
        .unwrap_or_default()
        .to_f64()
        .unwrap_or(0.0)
}
