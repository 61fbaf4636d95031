use common::Candle;

/// Exponential Moving Average of the closes in `candles` (newest-first).
///
/// Seeds with the simple average of the `period` oldest closes, then blends
/// the remaining closes oldest to newest with `k = 2 / (period + 1)`.
/// Returns `None` if `period == 0` or fewer than `period` candles are given.
pub fn ema(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut chronological = candles.iter().rev();

    let seed: f64 = chronological.by_ref().take(period).map(|c| c.close).sum::<f64>()
        / period as f64;

    Some(chronological.fold(seed, |ema, c| c.close * k + ema * (1.0 - k)))
}
