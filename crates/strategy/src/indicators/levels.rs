use common::Candle;

/// Low of the candle closest to `price` from below, if any candle trades below it.
pub fn nearest_support(candles: &[Candle], price: f64) -> Option<f64> {
    candles
        .iter()
        .map(|c| c.low)
        .filter(|&low| low < price)
        .min_by(|a, b| (price - a).abs().total_cmp(&(price - b).abs()))
}

/// High of the candle closest to `price` from above, if any candle trades above it.
pub fn nearest_resistance(candles: &[Candle], price: f64) -> Option<f64> {
    candles
        .iter()
        .map(|c| c.high)
        .filter(|&high| high > price)
        .min_by(|a, b| (price - a).abs().total_cmp(&(price - b).abs()))
}
