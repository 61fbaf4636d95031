use backtest::{evaluate_signal_outcome, replay, ReplaySettings};
use common::{Candle, Levels, Outcome, SignalType};
use strategy::{Analysis, OrderBlockStrategy, Strategy};

const HOUR: i64 = 3_600_000;
const H4: i64 = 4 * HOUR;
const BASE: i64 = 1_700_000_000_000;

/// Newest-first uptrend rising 0.5 per bar from 100.
fn uptrend(n: usize) -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..n)
        .map(|k| {
            let close = 100.0 + 0.5 * k as f64;
            let open = close - 0.3;
            Candle {
                timestamp: BASE + k as i64 * H4,
                open,
                high: close + 0.7,
                low: open - 0.7,
                close,
                volume: 1000.0,
            }
        })
        .collect();
    candles.reverse();
    candles
}

fn bar(timestamp: i64, low: f64, high: f64) -> Candle {
    Candle {
        timestamp,
        open: low + 0.2,
        high,
        low,
        close: high - 0.2,
        volume: 1000.0,
    }
}

#[test]
fn uptrend_signal_wins_when_target_is_touched_first() {
    let window = uptrend(150);
    let levels = Levels::from_candles(&window);

    let analysis = OrderBlockStrategy::default()
        .analyze(&window, &levels, None)
        .unwrap();
    let signal = match analysis {
        Analysis::Accepted(signal) => signal,
        other => panic!("expected a signal, got {other:?}"),
    };
    assert_eq!(signal.signal_type, SignalType::Bullish);
    assert_eq!(signal.entry, 174.5);
    assert!(signal.stop_loss < signal.entry && signal.take_profit > signal.entry);

    let entry_ts = window[0].timestamp;
    let tp = signal.take_profit;
    let sl = signal.stop_loss;
    let future = [
        bar(entry_ts + H4, sl + 1.0, tp - 3.0),
        bar(entry_ts + 2 * H4, sl + 2.0, tp - 1.0),
        bar(entry_ts + 3 * H4, sl + 3.0, tp + 0.5),
        bar(entry_ts + 4 * H4, sl - 5.0, tp - 2.0),
    ];

    let eval = evaluate_signal_outcome(&signal, entry_ts, &future);
    assert_eq!(eval.outcome, Outcome::Win);
    let expected = (future[2].timestamp - entry_ts) as f64 / 3_600_000.0;
    assert!((eval.trade_duration_hours.unwrap() - expected).abs() < 1e-9);
    assert_eq!(expected, 12.0);

    // evaluation is pure
    assert_eq!(evaluate_signal_outcome(&signal, entry_ts, &future), eval);
}

#[test]
fn full_uptrend_replay_with_wide_window() {
    let settings = ReplaySettings {
        window_size: 100,
        ..ReplaySettings::default()
    };
    let result = replay(&OrderBlockStrategy::default(), "BTC-USDT", "4h", &uptrend(150), &settings);

    assert_eq!(result.candles, 150);
    assert_eq!(result.stats.total, 30);
    assert_eq!(result.stats.wins, 30);
    assert_eq!(result.stats.win_rate, 100.0);

    let first = result.trades().next().unwrap();
    assert_eq!(first.index, 49);
    assert_eq!(first.symbol, "BTC-USDT");
    assert_eq!(first.trade_duration_hours, Some(36.0));
}
