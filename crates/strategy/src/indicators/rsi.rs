use common::Candle;

/// RSI (Relative Strength Index) over the `period + 1` most recent candles.
///
/// Gains and losses are the `period` close-to-close changes between
/// consecutive candles, taken newer minus older. Averages are simple means
/// over the period (no further Wilder smoothing, one sample only).
/// Returns `Some(100.0)` when there are no losses, `None` when fewer than
/// `period + 1` candles are available.
pub fn rsi(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let (gains, losses) = (1..=period).fold((0.0, 0.0), |(gains, losses), i| {
        let change = candles[i - 1].close - candles[i].close;
        if change > 0.0 {
            (gains + change, losses)
        } else {
            (gains, losses - change)
        }
    });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}
