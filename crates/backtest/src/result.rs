use serde::Serialize;

use common::{Candle, Outcome, Signal};

/// A signal found during the sweep, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Index of the window's newest candle in the full history.
    pub index: usize,
    pub timestamp: i64,
    pub signal: Signal,
}

/// A detection with its look-ahead outcome attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub index: usize,
    pub timestamp: i64,
    pub signal: Signal,
    pub outcome: Outcome,
    /// `None` while the trade is still open at the end of the horizon.
    pub trade_duration_hours: Option<f64>,
}

/// Inert record of a window whose analysis faulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowFault {
    pub index: usize,
    pub message: String,
    pub window: Vec<Candle>,
}

/// One entry in the replay output: either a signal or a recorded fault.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScanRecord<T> {
    Signal(T),
    Fault(WindowFault),
}

impl<T> ScanRecord<T> {
    pub fn as_signal(&self) -> Option<&T> {
        match self {
            ScanRecord::Signal(s) => Some(s),
            ScanRecord::Fault(_) => None,
        }
    }

    pub fn as_fault(&self) -> Option<&WindowFault> {
        match self {
            ScanRecord::Signal(_) => None,
            ScanRecord::Fault(f) => Some(f),
        }
    }
}

/// Aggregate counts for one symbol's run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BacktestStats {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub opens: usize,
    /// Faulted windows; never part of `total`.
    pub faults: usize,
    /// Percentage of wins over all signals, 0 when there are none.
    pub win_rate: f64,
}

impl BacktestStats {
    pub fn from_records(records: &[ScanRecord<TradeRecord>]) -> Self {
        let mut stats = BacktestStats::default();
        for record in records {
            match record {
                ScanRecord::Signal(trade) => {
                    stats.total += 1;
                    match trade.outcome {
                        Outcome::Win => stats.wins += 1,
                        Outcome::Loss => stats.losses += 1,
                        Outcome::Open => stats.opens += 1,
                    }
                }
                ScanRecord::Fault(_) => stats.faults += 1,
            }
        }
        if stats.total > 0 {
            stats.win_rate = stats.wins as f64 / stats.total as f64 * 100.0;
        }
        stats
    }
}

/// Everything produced by backtesting one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub symbol: String,
    pub interval: String,
    /// Number of candles the replay ran over.
    pub candles: usize,
    pub records: Vec<ScanRecord<TradeRecord>>,
    pub stats: BacktestStats,
    /// Set when the candle fetch failed and the run was skipped.
    pub fetch_error: Option<String>,
}

impl BacktestResult {
    pub fn empty(symbol: &str, interval: &str, candles: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            candles,
            records: Vec::new(),
            stats: BacktestStats::default(),
            fetch_error: None,
        }
    }

    pub fn failed(symbol: &str, interval: &str, error: impl Into<String>) -> Self {
        Self {
            fetch_error: Some(error.into()),
            ..Self::empty(symbol, interval, 0)
        }
    }

    pub fn trades(&self) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().filter_map(ScanRecord::as_signal)
    }

    pub fn faults(&self) -> impl Iterator<Item = &WindowFault> {
        self.records.iter().filter_map(ScanRecord::as_fault)
    }

    pub fn has_trades(&self) -> bool {
        self.stats.total > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Grade, HealthComponents, HealthScore, SignalType};

    fn trade(outcome: Outcome) -> ScanRecord<TradeRecord> {
        ScanRecord::Signal(TradeRecord {
            symbol: "BTC-USDT".into(),
            index: 20,
            timestamp: 0,
            signal: Signal {
                signal_type: SignalType::Bullish,
                strength: 0.5,
                entry: 100.0,
                stop_loss: 98.0,
                take_profit: 104.0,
                current_price: 100.0,
                risk_reward_ratio: 2.0,
                order_block: 1,
                support: None,
                resistance: None,
                health: HealthScore {
                    score: 70,
                    grade: Grade::B,
                    components: HealthComponents::default(),
                },
            },
            outcome,
            trade_duration_hours: None,
        })
    }

    fn fault() -> ScanRecord<TradeRecord> {
        ScanRecord::Fault(WindowFault {
            index: 30,
            message: "bad candle".into(),
            window: Vec::new(),
        })
    }

    #[test]
    fn stats_count_outcomes_and_skip_faults() {
        let records = vec![
            trade(Outcome::Win),
            trade(Outcome::Win),
            trade(Outcome::Loss),
            trade(Outcome::Open),
            fault(),
        ];
        let stats = BacktestStats::from_records(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.opens, 1);
        assert_eq!(stats.faults, 1);
        assert_eq!(stats.win_rate, 50.0);
    }

    #[test]
    fn win_rate_is_zero_without_signals() {
        let stats = BacktestStats::from_records(&[fault()]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.win_rate, 0.0);
    }

    #[test]
    fn failed_result_carries_error() {
        let result = BacktestResult::failed("ETH-USDT", "4h", "No data received for ETH-USDT");
        assert!(!result.has_trades());
        assert_eq!(result.trades().count(), 0);
        assert_eq!(result.fetch_error.as_deref(), Some("No data received for ETH-USDT"));
    }
}
