use common::Candle;

const BODY_WEIGHT: f64 = 0.5;
const VOLUME_WEIGHT: f64 = 0.3;
const WICK_WEIGHT: f64 = 0.2;

/// Strength of a single candle in [0, 1].
///
/// `body * 0.5 + min(volume_ratio, 1) * 0.3 + min(wick, 0.5) * 0.2` where body
/// and wick (full high-low range) are relative to the open and the volume
/// ratio is relative to `avg_volume`.
pub fn candle_strength(candle: &Candle, avg_volume: f64) -> f64 {
    let body = (candle.close - candle.open).abs() / candle.open;
    let volume_ratio = candle.volume / avg_volume;
    let wick = (candle.high - candle.low).abs() / candle.open;

    let strength = body * BODY_WEIGHT
        + volume_ratio.min(1.0) * VOLUME_WEIGHT
        + wick.min(0.5) * WICK_WEIGHT;

    strength.clamp(0.0, 1.0)
}
