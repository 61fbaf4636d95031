use common::Candle;

/// A bullish block's low may sit at most this far above the current low.
const BULLISH_LOW_TOLERANCE: f64 = 0.98;
/// A bearish block's high may sit at most this far below the current high.
const BEARISH_HIGH_TOLERANCE: f64 = 1.02;

/// Index of the nearest order-block candle in `candles` (newest-first).
///
/// Every candle except the most recent is a candidate. A bullish candle
/// qualifies when `current.low >= 0.98 * candle.low`; a bearish candle
/// qualifies when `current.high <= 1.02 * candle.high`. Among qualifying
/// candles the one whose close is nearest `current.close` wins, the more
/// recent candle on ties.
pub fn find_nearest_order_block(candles: &[Candle], current: &Candle) -> Option<usize> {
    if candles.len() < 2 {
        return None;
    }

    let mut nearest: Option<(usize, f64)> = None;
    for (index, candle) in candles.iter().enumerate().skip(1) {
        if !qualifies(candle, current) {
            continue;
        }
        let distance = (current.close - candle.close).abs();
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }

    nearest.map(|(index, _)| index)
}

fn qualifies(candle: &Candle, current: &Candle) -> bool {
    let bullish = candle.is_bullish() && current.low >= candle.low * BULLISH_LOW_TOLERANCE;
    let bearish = candle.is_bearish() && current.high <= candle.high * BEARISH_HIGH_TOLERANCE;
    bullish || bearish
}
