use std::time::Duration;

use tracing::{error, info, warn};

use common::{CandleSource, Config};
use strategy::Strategy;

use crate::replay::{replay, ReplaySettings};
use crate::result::BacktestResult;

/// Per-run settings shared by every symbol in a batch.
#[derive(Debug, Clone)]
pub struct BacktestSettings {
    pub interval: String,
    pub candle_limit: u32,
    pub replay: ReplaySettings,
    /// Pause between two symbols to stay under exchange rate limits.
    pub symbol_delay: Duration,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for BacktestSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            interval: cfg.interval.clone(),
            candle_limit: cfg.candle_limit,
            replay: ReplaySettings {
                window_size: cfg.window_size,
                lookahead: cfg.lookahead,
                ..ReplaySettings::default()
            },
            symbol_delay: cfg.symbol_delay,
        }
    }
}

/// Fetch one symbol's history and replay `strategy` over it.
///
/// Never fails: a fetch error or a short history yields an empty result.
pub async fn run_backtest(
    source: &dyn CandleSource,
    strategy: &dyn Strategy,
    symbol: &str,
    settings: &BacktestSettings,
) -> BacktestResult {
    let interval = settings.interval.as_str();

    let candles = match source
        .fetch_candles(symbol, interval, settings.candle_limit)
        .await
    {
        Ok(candles) => candles,
        Err(e) => {
            error!(symbol, interval, error = %e, "Candle fetch failed, skipping symbol");
            return BacktestResult::failed(symbol, interval, e.to_string());
        }
    };

    let needed = settings.replay.min_history();
    if candles.len() < needed {
        warn!(symbol, candles = candles.len(), needed, "Not enough candles for a replay");
        return BacktestResult::empty(symbol, interval, candles.len());
    }

    let result = replay(strategy, symbol, interval, &candles, &settings.replay);
    info!(
        symbol,
        strategy = strategy.name(),
        candles = result.candles,
        signals = result.stats.total,
        wins = result.stats.wins,
        losses = result.stats.losses,
        faults = result.stats.faults,
        win_rate = result.stats.win_rate,
        "Backtest completed"
    );
    result
}

/// Backtest each symbol in turn, sleeping `symbol_delay` between symbols.
/// A failing symbol never stops the batch.
pub async fn run_batch(
    source: &dyn CandleSource,
    strategy: &dyn Strategy,
    symbols: &[String],
    settings: &BacktestSettings,
) -> Vec<BacktestResult> {
    info!(symbols = symbols.len(), interval = %settings.interval, "Starting batch backtest");

    let mut results = Vec::with_capacity(symbols.len());
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 && !settings.symbol_delay.is_zero() {
            tokio::time::sleep(settings.symbol_delay).await;
        }
        results.push(run_backtest(source, strategy, symbol, settings).await);
    }
    results
}
