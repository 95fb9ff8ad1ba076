use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::{header, Client};
use std::collections::HashMap;
use std::time::Duration;

use analysis_core::{
    AccountSnapshot, AnalysisError, Bar, BrokerageSource, MarketDataSource, Position,
};

use crate::models::{AlpacaAccount, AlpacaPosition, MultiBarsResponse};

const DEFAULT_TRADING_URL: &str = "https://paper-api.alpaca.markets";
const DEFAULT_DATA_URL: &str = "https://data.alpaca.markets";

/// Alpaca-backed implementation of both collaborator traits: the Market Data
/// API for daily bars and the Trading API for account and positions.
pub struct AlpacaClient {
    client: Client,
    trading_url: String,
    data_url: String,
    api_key: String,
    secret_key: String,
}

impl AlpacaClient {
    pub fn new(
        api_key: String,
        secret_key: String,
        trading_url: String,
        data_url: String,
    ) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            trading_url,
            data_url,
            api_key,
            secret_key,
        })
    }

    /// Create client from environment variables.
    /// Accepts both APCA_API_KEY_ID / APCA_API_SECRET_KEY (standard Alpaca
    /// names) and ALPACA_API_KEY / ALPACA_SECRET_KEY as fallbacks.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("APCA_API_KEY_ID")
            .or_else(|_| std::env::var("ALPACA_API_KEY"))
            .map_err(|_| anyhow!("APCA_API_KEY_ID (or ALPACA_API_KEY) not set"))?;
        let secret_key = std::env::var("APCA_API_SECRET_KEY")
            .or_else(|_| std::env::var("ALPACA_SECRET_KEY"))
            .map_err(|_| anyhow!("APCA_API_SECRET_KEY (or ALPACA_SECRET_KEY) not set"))?;
        let trading_url = std::env::var("ALPACA_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TRADING_URL.to_string());
        let data_url = std::env::var("ALPACA_DATA_URL")
            .unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());

        Self::new(api_key, secret_key, trading_url, data_url)
    }

    pub fn is_paper(&self) -> bool {
        self.trading_url.contains("paper")
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, AnalysisError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(&self.api_key)
                .map_err(|_| AnalysisError::Upstream("invalid API key header".to_string()))?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(&self.secret_key)
                .map_err(|_| AnalysisError::Upstream("invalid secret key header".to_string()))?,
        );
        Ok(headers)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AnalysisError> {
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .query(query)
            .send()
            .await
            .map_err(|e| AnalysisError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Upstream(format!(
                "Alpaca API error {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AnalysisError::Upstream(e.to_string()))
    }

    /// Fetch daily bars for a symbol batch in one request, following
    /// `next_page_token` until the window is exhausted.
    pub async fn get_daily_bars(
        &self,
        symbols: &[String],
        days: u32,
    ) -> Result<HashMap<String, Vec<Bar>>, AnalysisError> {
        let url = format!("{}/v2/stocks/bars", self.data_url);
        let start = Utc::now() - ChronoDuration::days(days as i64);
        let symbol_list = symbols.join(",");

        let mut bars: HashMap<String, Vec<Bar>> = HashMap::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("symbols", symbol_list.clone()),
                ("timeframe", "1Day".to_string()),
                ("start", start.to_rfc3339()),
                ("limit", "10000".to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("page_token", token.clone()));
            }

            let page: MultiBarsResponse = self.get_json(&url, &query).await?;
            for (symbol, page_bars) in page.bars {
                bars.entry(symbol)
                    .or_default()
                    .extend(page_bars.iter().map(|b| b.to_bar()));
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(
            symbols = %symbol_list,
            days,
            series = bars.len(),
            "fetched daily bars from Alpaca"
        );
        Ok(bars)
    }

    pub async fn get_account(&self) -> Result<AccountSnapshot, AnalysisError> {
        let url = format!("{}/v2/account", self.trading_url);
        let account: AlpacaAccount = self.get_json(&url, &[]).await?;
        Ok(account.to_snapshot())
    }

    pub async fn get_positions(&self) -> Result<Vec<Position>, AnalysisError> {
        let url = format!("{}/v2/positions", self.trading_url);
        let positions: Vec<AlpacaPosition> = self.get_json(&url, &[]).await?;
        Ok(positions.iter().map(|p| p.to_position()).collect())
    }
}

#[async_trait]
impl MarketDataSource for AlpacaClient {
    async fn fetch_daily_bars(
        &self,
        symbols: &[String],
        days: u32,
    ) -> Result<HashMap<String, Vec<Bar>>, AnalysisError> {
        self.get_daily_bars(symbols, days).await
    }
}

#[async_trait]
impl BrokerageSource for AlpacaClient {
    async fn account(&self) -> Result<AccountSnapshot, AnalysisError> {
        self.get_account().await
    }

    async fn positions(&self) -> Result<Vec<Position>, AnalysisError> {
        self.get_positions().await
    }
}
