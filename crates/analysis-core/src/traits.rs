use async_trait::async_trait;
use std::collections::HashMap;

use crate::{AccountSnapshot, AnalysisError, Bar, Position};

/// Source of historical daily bars.
///
/// One call covers the whole symbol batch so multi-symbol operations cost a
/// single round trip. A symbol with no bars in range may be absent from the
/// map or mapped to an empty vec; both mean "no data", neither is an error.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_daily_bars(
        &self,
        symbols: &[String],
        days: u32,
    ) -> Result<HashMap<String, Vec<Bar>>, AnalysisError>;
}

/// Source of current account balances and open positions
#[async_trait]
pub trait BrokerageSource: Send + Sync {
    async fn account(&self) -> Result<AccountSnapshot, AnalysisError>;

    async fn positions(&self) -> Result<Vec<Position>, AnalysisError>;
}

// Shared handles count as sources too, so one client can serve both roles
#[async_trait]
impl<T: MarketDataSource + ?Sized> MarketDataSource for std::sync::Arc<T> {
    async fn fetch_daily_bars(
        &self,
        symbols: &[String],
        days: u32,
    ) -> Result<HashMap<String, Vec<Bar>>, AnalysisError> {
        (**self).fetch_daily_bars(symbols, days).await
    }
}

#[async_trait]
impl<T: BrokerageSource + ?Sized> BrokerageSource for std::sync::Arc<T> {
    async fn account(&self) -> Result<AccountSnapshot, AnalysisError> {
        (**self).account().await
    }

    async fn positions(&self) -> Result<Vec<Position>, AnalysisError> {
        (**self).positions().await
    }
}
