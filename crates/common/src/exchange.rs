use async_trait::async_trait;

use crate::{Candle, Result};

/// Abstraction over the historical market-data provider.
///
/// `BinanceClient` implements this against the public kline endpoint.
/// Tests supply in-memory implementations.
///
/// Implementations must return candles newest-first (index 0 = most recent).
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch up to `limit` candles of `interval` for `symbol` (e.g. "BTC-USDT").
    async fn fetch_candles(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>>;
}
