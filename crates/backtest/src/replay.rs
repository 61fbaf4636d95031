//! Sliding-window replay of a strategy over a full candle history.
//!
//! The history is newest-first. The sweep starts from the oldest window that
//! still leaves `min_start` newer candles and walks toward the present, each
//! window treating its newest close as the live price. Faulting windows are
//! recorded and skipped; they never abort the sweep.

use tracing::{debug, error};

use common::{Candle, Levels};
use strategy::{Analysis, Strategy};

use crate::outcome::{evaluate_signal_outcome, future_candles};
use crate::result::{BacktestResult, BacktestStats, Detection, ScanRecord, TradeRecord, WindowFault};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySettings {
    pub window_size: usize,
    /// Lowest window start index, keeping room for the look-ahead.
    pub min_start: usize,
    pub lookahead: usize,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            window_size: 50,
            min_start: 20,
            lookahead: 19,
        }
    }
}

impl ReplaySettings {
    /// Smallest history that yields at least one window.
    pub fn min_history(&self) -> usize {
        self.window_size + self.min_start
    }
}

/// Run `strategy` over every window of `history`, oldest window first.
pub fn scan_historical_signals(
    strategy: &dyn Strategy,
    history: &[Candle],
    levels: &Levels,
    settings: &ReplaySettings,
) -> Vec<ScanRecord<Detection>> {
    let mut records = Vec::new();
    if settings.window_size == 0 || history.len() < settings.min_history() {
        return records;
    }

    for index in (settings.min_start..history.len() - settings.window_size).rev() {
        let window = &history[index..index + settings.window_size];
        let current = &window[0];

        match strategy.analyze(window, levels, Some(current.close)) {
            Ok(Analysis::Accepted(signal)) => {
                debug!(
                    index,
                    signal_type = %signal.signal_type,
                    entry = signal.entry,
                    score = signal.health.score,
                    "Signal detected"
                );
                records.push(ScanRecord::Signal(Detection {
                    index,
                    timestamp: current.timestamp,
                    signal,
                }));
            }
            Ok(Analysis::Rejected(reason)) => {
                debug!(index, %reason, "Window rejected");
            }
            Err(e) => {
                error!(index, strategy = strategy.name(), error = %e, "Window analysis failed");
                records.push(ScanRecord::Fault(WindowFault {
                    index,
                    message: format!("Error at index {index}: {e}"),
                    window: window.to_vec(),
                }));
            }
        }
    }
    records
}

/// Attach look-ahead outcomes to every detection. Faults pass through unchanged.
pub fn append_outcomes(
    symbol: &str,
    detections: Vec<ScanRecord<Detection>>,
    history: &[Candle],
    lookahead: usize,
) -> Vec<ScanRecord<TradeRecord>> {
    detections
        .into_iter()
        .map(|record| match record {
            ScanRecord::Signal(d) => {
                let future = future_candles(history, d.index, lookahead);
                let eval = evaluate_signal_outcome(&d.signal, d.timestamp, &future);
                ScanRecord::Signal(TradeRecord {
                    symbol: symbol.to_string(),
                    index: d.index,
                    timestamp: d.timestamp,
                    signal: d.signal,
                    outcome: eval.outcome,
                    trade_duration_hours: eval.trade_duration_hours,
                })
            }
            ScanRecord::Fault(f) => ScanRecord::Fault(f),
        })
        .collect()
}

/// Replay, evaluate and aggregate one symbol's history.
pub fn replay(
    strategy: &dyn Strategy,
    symbol: &str,
    interval: &str,
    history: &[Candle],
    settings: &ReplaySettings,
) -> BacktestResult {
    let levels = Levels::from_candles(history);
    let detections = scan_historical_signals(strategy, history, &levels, settings);
    let records = append_outcomes(symbol, detections, history, settings.lookahead);
    let stats = BacktestStats::from_records(&records);

    BacktestResult {
        symbol: symbol.to_string(),
        interval: interval.to_string(),
        candles: history.len(),
        records,
        stats,
        fetch_error: None,
    }
}
