use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use common::{Candle, CandleSource, Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
const KLINES_PATH: &str = "/api/v3/klines";

/// Public REST client for Binance klines. No credentials are needed.
pub struct BinanceClient {
    base_url: String,
    http: Client,
}

impl BinanceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::builder()
                .use_rustls_tls()
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// "BTC-USDT" -> "BTCUSDT"
    pub fn exchange_symbol(symbol: &str) -> String {
        symbol.replace('-', "").to_uppercase()
    }

    async fn get_klines(&self, symbol: &str, interval: &str, limit: u32) -> Result<String> {
        let url = format!("{}{KLINES_PATH}", self.base_url);
        let limit = limit.to_string();

        let resp = self
            .http
            .get(&url)
            .query(&[("symbol", symbol), ("interval", interval), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Exchange(format!("HTTP {status}: {body}")));
        }
        Ok(body)
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CandleSource for BinanceClient {
    async fn fetch_candles(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>> {
        let pair = Self::exchange_symbol(symbol);
        debug!(pair = %pair, interval, limit, "Requesting klines from Binance");

        let body = self.get_klines(&pair, interval, limit).await?;
        let candles = parse_klines(&body)?;
        if candles.is_empty() {
            return Err(Error::NoData(symbol.to_string()));
        }

        info!(symbol, count = candles.len(), "Fetched candles");
        Ok(candles)
    }
}

/// Parse a `/api/v3/klines` body into newest-first candles.
///
/// Binance returns rows oldest-first as
/// `[openTime, "open", "high", "low", "close", "volume", closeTime, ...]`.
pub fn parse_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;

    let mut candles = rows
        .iter()
        .map(|row| parse_row(row))
        .collect::<Result<Vec<_>>>()?;
    candles.reverse();
    Ok(candles)
}

fn parse_row(row: &[Value]) -> Result<Candle> {
    if row.len() < 6 {
        return Err(Error::Exchange(format!(
            "kline row has {} fields, expected at least 6",
            row.len()
        )));
    }

    let timestamp = row[0]
        .as_i64()
        .ok_or_else(|| Error::Exchange(format!("kline open time is not an integer: {}", row[0])))?;

    Ok(Candle {
        timestamp,
        open: number(&row[1], "open")?,
        high: number(&row[2], "high")?,
        low: number(&row[3], "low")?,
        close: number(&row[4], "close")?,
        volume: number(&row[5], "volume")?,
    })
}

/// Binance encodes prices as strings; accept bare numbers as well.
fn number(value: &Value, field: &str) -> Result<f64> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::Exchange(format!("kline {field} is not numeric: {value}")))
}
