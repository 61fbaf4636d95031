use common::Candle;

/// Average True Range over the `period` most recent true ranges.
///
/// The true range of a candle is measured against the close of its
/// chronological predecessor (the next index in a newest-first slice).
/// Returns `None` when fewer than `period + 1` candles are available.
pub fn atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let total: f64 = candles
        .windows(2)
        .take(period)
        .map(|pair| true_range(&pair[0], &pair[1]))
        .sum();

    Some(total / period as f64)
}

/// `max(high - low, |high - prev_close|, |low - prev_close|)`
pub fn true_range(candle: &Candle, prev: &Candle) -> f64 {
    (candle.high - candle.low)
        .max((candle.high - prev.close).abs())
        .max((candle.low - prev.close).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(high: f64, low: f64, close: f64) -> Candle {
        Candle {
            timestamp: 0,
            open: close,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn atr_none_when_insufficient_data() {
        let candles = vec![bar(2.0, 1.0, 1.5); 14];
        assert!(atr(&candles, 14).is_none());
    }

    #[test]
    fn true_range_uses_gap_from_previous_close() {
        let prev = bar(10.0, 9.0, 9.5);
        let gap_up = bar(13.0, 12.0, 12.5);
        assert_eq!(true_range(&gap_up, &prev), 3.5);
    }

    #[test]
    fn atr_averages_most_recent_ranges() {
        // newest-first: two wide bars over narrow history
        let candles = vec![
            bar(14.0, 10.0, 12.0),
            bar(14.0, 10.0, 12.0),
            bar(12.5, 11.5, 12.0),
            bar(12.5, 11.5, 12.0),
        ];
        assert_eq!(atr(&candles, 1), Some(4.0));
        // TR(c1, c2) is still the wide bar's own range
        assert_eq!(atr(&candles, 2), Some(4.0));
        // only now does a narrow range enter the average
        assert_eq!(atr(&candles, 3), Some((4.0 + 4.0 + 1.0) / 3.0));
    }

    #[test]
    fn atr_constant_range() {
        let candles = vec![bar(101.0, 99.0, 100.0); 20];
        assert_eq!(atr(&candles, 14), Some(2.0));
    }
}
