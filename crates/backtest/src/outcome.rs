//! Look-ahead evaluation of a detected signal.

use common::{Candle, Outcome, Signal};

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub trade_duration_hours: Option<f64>,
}

impl Evaluation {
    fn open() -> Self {
        Self {
            outcome: Outcome::Open,
            trade_duration_hours: None,
        }
    }

    fn closed(outcome: Outcome, entry_timestamp: i64, exit: &Candle) -> Self {
        Self {
            outcome,
            trade_duration_hours: Some((exit.timestamp - entry_timestamp) as f64 / MS_PER_HOUR),
        }
    }
}

/// Walk `future` (oldest first) until the stop-loss or take-profit is touched.
///
/// A candle that spans both levels counts as a loss: the stop is checked first.
/// Pure; the same inputs always produce the same evaluation.
pub fn evaluate_signal_outcome(signal: &Signal, entry_timestamp: i64, future: &[Candle]) -> Evaluation {
    for candle in future {
        let (stopped, target_hit) = if signal.is_long() {
            (candle.low <= signal.stop_loss, candle.high >= signal.take_profit)
        } else {
            (candle.high >= signal.stop_loss, candle.low <= signal.take_profit)
        };

        if stopped {
            return Evaluation::closed(Outcome::Loss, entry_timestamp, candle);
        }
        if target_hit {
            return Evaluation::closed(Outcome::Win, entry_timestamp, candle);
        }
    }
    Evaluation::open()
}

/// Up to `horizon` candles that follow history index `index`, oldest first.
///
/// `history` is newest-first, so the candles after `index` sit at
/// `index - 1`, `index - 2`, and so on.
pub fn future_candles(history: &[Candle], index: usize, horizon: usize) -> Vec<Candle> {
    let index = index.min(history.len());
    history[index.saturating_sub(horizon)..index]
        .iter()
        .rev()
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Grade, HealthComponents, HealthScore, SignalType};

    const HOUR: i64 = 3_600_000;

    fn signal(signal_type: SignalType, entry: f64, stop_loss: f64, take_profit: f64) -> Signal {
        Signal {
            signal_type,
            strength: 0.6,
            entry,
            stop_loss,
            take_profit,
            current_price: entry,
            risk_reward_ratio: (take_profit - entry).abs() / (stop_loss - entry).abs(),
            order_block: 3,
            support: None,
            resistance: None,
            health: HealthScore {
                score: 75,
                grade: Grade::B,
                components: HealthComponents::default(),
            },
        }
    }

    fn bar(timestamp: i64, high: f64, low: f64) -> Candle {
        Candle {
            timestamp,
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: 1.0,
        }
    }

    #[test]
    fn long_hits_target_first() {
        let s = signal(SignalType::Bullish, 100.0, 98.0, 104.0);
        let future = [bar(4 * HOUR, 102.0, 99.0), bar(8 * HOUR, 104.5, 101.0)];
        let eval = evaluate_signal_outcome(&s, 0, &future);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_eq!(eval.trade_duration_hours, Some(8.0));
    }

    #[test]
    fn long_stopped_out() {
        let s = signal(SignalType::Bullish, 100.0, 98.0, 104.0);
        let future = [bar(4 * HOUR, 101.0, 97.5), bar(8 * HOUR, 105.0, 101.0)];
        let eval = evaluate_signal_outcome(&s, 0, &future);
        assert_eq!(eval.outcome, Outcome::Loss);
        assert_eq!(eval.trade_duration_hours, Some(4.0));
    }

    #[test]
    fn candle_spanning_both_levels_is_a_loss() {
        let s = signal(SignalType::Bullish, 100.0, 98.0, 104.0);
        let eval = evaluate_signal_outcome(&s, 0, &[bar(HOUR, 110.0, 90.0)]);
        assert_eq!(eval.outcome, Outcome::Loss);

        let s = signal(SignalType::Bearish, 100.0, 102.0, 96.0);
        let eval = evaluate_signal_outcome(&s, 0, &[bar(HOUR, 110.0, 90.0)]);
        assert_eq!(eval.outcome, Outcome::Loss);
    }

    #[test]
    fn short_hits_target_first() {
        let s = signal(SignalType::Bearish, 100.0, 102.0, 96.0);
        let future = [bar(2 * HOUR, 101.0, 97.0), bar(6 * HOUR, 99.0, 95.5)];
        let eval = evaluate_signal_outcome(&s, 0, &future);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_eq!(eval.trade_duration_hours, Some(6.0));
    }

    #[test]
    fn untouched_levels_stay_open() {
        let s = signal(SignalType::Bullish, 100.0, 98.0, 104.0);
        let future = [bar(HOUR, 101.0, 99.0), bar(2 * HOUR, 102.0, 99.5)];
        assert_eq!(
            evaluate_signal_outcome(&s, 0, &future),
            Evaluation {
                outcome: Outcome::Open,
                trade_duration_hours: None
            }
        );
        assert_eq!(evaluate_signal_outcome(&s, 0, &[]).outcome, Outcome::Open);
    }

    #[test]
    fn touching_exact_level_counts() {
        let s = signal(SignalType::Bullish, 100.0, 98.0, 104.0);
        let eval = evaluate_signal_outcome(&s, HOUR, &[bar(3 * HOUR, 104.0, 99.0)]);
        assert_eq!(eval.outcome, Outcome::Win);
        assert_eq!(eval.trade_duration_hours, Some(2.0));
    }

    #[test]
    fn future_candles_are_chronological() {
        let history: Vec<Candle> = (0..10).rev().map(|k| bar(k * HOUR, 1.0, 0.5)).collect();
        // history[0] is the newest (t = 9h); index 5 is t = 4h
        let future = future_candles(&history, 5, 3);
        let stamps: Vec<i64> = future.iter().map(|c| c.timestamp / HOUR).collect();
        assert_eq!(stamps, vec![5, 6, 7]);

        assert_eq!(future_candles(&history, 2, 19).len(), 2);
        assert!(future_candles(&history, 0, 19).is_empty());
    }
}
